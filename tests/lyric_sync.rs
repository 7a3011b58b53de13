//! End-to-end lyric timing through the public API: parse, cache, then drive
//! the sync loop with a scripted clock.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::time::Duration;

use lyrics_shower::error::Result;
use lyrics_shower::lyrics::{parse_lrc, LyricsCache};
use lyrics_shower::services::Library;
use lyrics_shower::sync::{Frontend, LyricTimeline, Playback, SyncLoop, SyncOutcome};
use lyrics_shower::types::{CacheKind, Query};

const SONG: &str = "\
[ti: Test Song]
[00:00.50] first
[00:02.00][00:06.00] chorus
[00:04.00] verse
";

/// A song of fixed length at a fixed position.
struct ScriptedPlayback {
    now: Duration,
    length: Duration,
}

impl Playback for ScriptedPlayback {
    fn is_finished(&mut self) -> bool {
        self.now >= self.length
    }

    fn elapsed(&self) -> Duration {
        self.now
    }

    fn stop(&mut self) {
        self.now = self.length;
    }
}

/// Records the current line of every frame; asks to stop after `stop_after` frames.
struct Recorder<'a> {
    playback_clock: &'a std::cell::Cell<Duration>,
    frames: Vec<(Duration, String)>,
    stop_after: Option<usize>,
}

impl Frontend for &mut Recorder<'_> {
    fn draw(&mut self, timeline: &LyricTimeline, elapsed: Duration) -> Result<()> {
        let text = timeline.current_line().map(|l| l.text.clone()).unwrap_or_default();
        self.frames.push((elapsed, text));
        Ok(())
    }

    fn wait_for_stop(&mut self, timeout: Duration) -> Result<bool> {
        self.playback_clock.set(self.playback_clock.get() + timeout);
        Ok(self.stop_after.is_some_and(|n| self.frames.len() >= n))
    }
}

/// Playback reading the clock the recorder advances.
struct SharedClock<'a> {
    clock: &'a std::cell::Cell<Duration>,
    inner: ScriptedPlayback,
}

impl Playback for SharedClock<'_> {
    fn is_finished(&mut self) -> bool {
        self.inner.now = self.clock.get();
        self.inner.is_finished()
    }

    fn elapsed(&self) -> Duration {
        self.clock.get()
    }

    fn stop(&mut self) {
        self.inner.stop();
    }
}

#[test]
fn lines_follow_the_clock_until_the_song_ends() {
    let clock = std::cell::Cell::new(Duration::ZERO);
    let mut recorder = Recorder { playback_clock: &clock, frames: Vec::new(), stop_after: None };
    let playback = SharedClock {
        clock: &clock,
        inner: ScriptedPlayback { now: Duration::ZERO, length: Duration::from_secs(7) },
    };

    let timeline = LyricTimeline::new(parse_lrc(SONG));
    let outcome = SyncLoop::new(playback, &mut recorder, timeline, Duration::from_millis(500)).run().unwrap();
    assert_eq!(outcome, SyncOutcome::Finished);

    let at = |secs: f64| {
        recorder
            .frames
            .iter()
            .find(|(t, _)| *t == Duration::from_secs_f64(secs))
            .map(|(_, text)| text.as_str())
            .unwrap()
    };
    assert_eq!(at(0.0), "first");
    assert_eq!(at(2.0), "chorus");
    assert_eq!(at(3.5), "chorus");
    assert_eq!(at(4.0), "verse");
    assert_eq!(at(6.5), "chorus");
    assert_eq!(recorder.frames.len(), 14);
}

#[test]
fn user_stop_stops_playback() {
    let clock = std::cell::Cell::new(Duration::ZERO);
    let mut recorder = Recorder { playback_clock: &clock, frames: Vec::new(), stop_after: Some(3) };
    let playback = ScriptedPlayback { now: Duration::ZERO, length: Duration::from_secs(600) };

    let timeline = LyricTimeline::new(parse_lrc(SONG));
    let outcome = SyncLoop::new(playback, &mut recorder, timeline, Duration::from_millis(100)).run().unwrap();
    assert_eq!(outcome, SyncOutcome::Stopped);
    assert_eq!(recorder.frames.len(), 3);
}

#[test]
fn cached_lyrics_are_listed_by_title() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LyricsCache::new(dir.path().join("lyrics"));
    let title = Query::from("AC/DC Thunderstruck").song_title();
    cache.save(&title, SONG).unwrap();

    let library = Library::new(dir.path().join("music"), dir.path().join("lyrics"));
    let lyrics = library.entries(CacheKind::Lyrics).unwrap();
    assert_eq!(lyrics.len(), 1);
    assert_eq!(lyrics[0].stem, "AC-DC Thunderstruck");
    assert_eq!(parse_lrc(&cache.load(&title).unwrap().unwrap()).len(), 4);
}
