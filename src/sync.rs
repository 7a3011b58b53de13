//! Lyric-timing synchronization.
//!
//! The player runs as an external process, so the only clock available is
//! wall time since it was spawned. Every tick the loop reads that clock, moves
//! the [`LyricTimeline`] cursor to the line being sung and redraws.

use std::time::Duration;

use crate::error::Result;
use crate::lyrics::LyricLine;

/// Something playing audio whose progress can be observed.
pub trait Playback {
    /// Whether playback has ended on its own.
    fn is_finished(&mut self) -> bool;
    /// Time since playback started.
    fn elapsed(&self) -> Duration;
    /// Stop playback early.
    fn stop(&mut self);
}

/// Where frames go and where the stop request comes from.
pub trait Frontend {
    /// Render the current state.
    fn draw(&mut self, timeline: &LyricTimeline, elapsed: Duration) -> Result<()>;
    /// Wait up to `timeout`; `true` when the user asked to stop.
    fn wait_for_stop(&mut self, timeout: Duration) -> Result<bool>;
}

/// Sorted lyric lines plus the index of the line being sung.
///
/// The index only moves forward while time moves forward and always points
/// inside `lines` when `lines` is non-empty.
#[derive(Debug, Clone)]
pub struct LyricTimeline {
    lines: Vec<LyricLine>,
    current: usize,
}

impl LyricTimeline {
    /// Wrap parsed lines. `lines` must be sorted by timestamp.
    pub fn new(lines: Vec<LyricLine>) -> Self {
        debug_assert!(lines.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        Self { lines, current: 0 }
    }

    /// All lines.
    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    /// Index of the current line.
    pub const fn current(&self) -> usize {
        self.current
    }

    /// The current line, if there are any lines.
    pub fn current_line(&self) -> Option<&LyricLine> {
        self.lines.get(self.current)
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Step forward past every line whose start `elapsed` has reached.
    /// Never moves backward. Returns whether the index changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let before = self.current;
        while self.current + 1 < self.lines.len() && elapsed >= self.lines[self.current + 1].timestamp {
            self.current += 1;
        }
        self.current != before
    }

    /// Follow a clock that may jump: [`Self::seek`] when `elapsed` is before
    /// the current line, [`Self::advance`] otherwise. Returns whether the index changed.
    pub fn sync_to(&mut self, elapsed: Duration) -> bool {
        let before = self.current;
        if self.current > 0 && self.current_line().is_some_and(|l| elapsed < l.timestamp) {
            self.seek(elapsed);
            return self.current != before;
        }
        self.advance(elapsed)
    }

    /// Position the cursor from scratch: last line started at or before `elapsed`.
    pub fn seek(&mut self, elapsed: Duration) {
        let started = self.lines.partition_point(|l| l.timestamp <= elapsed);
        self.current = started.saturating_sub(1);
    }
}

/// How a synced session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The player exited by itself.
    Finished,
    /// The user stopped playback.
    Stopped,
}

/// Drives redraws from a playback clock until the song ends or the user stops it.
pub struct SyncLoop<P, F> {
    playback: P,
    frontend: F,
    timeline: LyricTimeline,
    interval: Duration,
}

impl<P: Playback, F: Frontend> SyncLoop<P, F> {
    /// Create a loop redrawing every `interval`.
    pub const fn new(playback: P, frontend: F, timeline: LyricTimeline, interval: Duration) -> Self {
        Self { playback, frontend, timeline, interval }
    }

    /// Run to completion.
    pub fn run(mut self) -> Result<SyncOutcome> {
        loop {
            if self.playback.is_finished() {
                tracing::info!("Playback finished");
                return Ok(SyncOutcome::Finished);
            }

            let elapsed = self.playback.elapsed();
            if self.timeline.sync_to(elapsed) {
                tracing::trace!("Line {} at {elapsed:?}", self.timeline.current());
            }
            self.frontend.draw(&self.timeline, elapsed)?;

            if self.frontend.wait_for_stop(self.interval)? {
                tracing::info!("Playback stopped by user");
                self.playback.stop();
                return Ok(SyncOutcome::Stopped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn timeline() -> LyricTimeline {
        LyricTimeline::new(vec![
            LyricLine::new(1.0, "one"),
            LyricLine::new(2.5, "two"),
            LyricLine::new(2.5, "two bis"),
            LyricLine::new(4.0, "three"),
        ])
    }

    #[test]
    fn starts_on_first_line_before_any_timestamp() {
        let mut t = timeline();
        assert!(!t.advance(Duration::from_millis(200)));
        assert_eq!(t.current_line().unwrap().text, "one");
    }

    #[test]
    fn advances_past_lines_sharing_a_timestamp() {
        let mut t = timeline();
        assert!(t.advance(Duration::from_millis(2600)));
        assert_eq!(t.current(), 2);
        t.advance(Duration::from_secs(60));
        assert_eq!(t.current(), 3);
    }

    #[test]
    fn boundary_is_inclusive() {
        let mut t = timeline();
        t.advance(Duration::from_secs(4));
        assert_eq!(t.current_line().unwrap().text, "three");
    }

    #[test]
    fn advance_never_moves_backward() {
        let mut t = timeline();
        t.advance(Duration::from_secs(5));
        assert!(!t.advance(Duration::from_millis(1500)));
        assert_eq!(t.current(), 3);
    }

    #[test]
    fn backwards_clock_reseeks() {
        let mut t = timeline();
        t.sync_to(Duration::from_secs(5));
        assert!(t.sync_to(Duration::from_millis(1500)));
        assert_eq!(t.current(), 0);
        assert!(t.sync_to(Duration::from_millis(2500)));
        assert_eq!(t.current(), 2);
    }

    #[test]
    fn empty_timeline_stays_empty() {
        let mut t = LyricTimeline::new(Vec::new());
        assert!(!t.advance(Duration::from_secs(3)));
        assert!(t.current_line().is_none());
    }

    struct FakePlayback {
        now: Rc<Cell<Duration>>,
        length: Duration,
        stopped: Rc<Cell<bool>>,
    }

    impl Playback for FakePlayback {
        fn is_finished(&mut self) -> bool {
            self.now.get() >= self.length
        }
        fn elapsed(&self) -> Duration {
            self.now.get()
        }
        fn stop(&mut self) {
            self.stopped.set(true);
        }
    }

    /// Advances the shared clock by the wait timeout and records drawn lines.
    struct FakeFrontend {
        now: Rc<Cell<Duration>>,
        drawn: Vec<usize>,
        stop_after: Option<usize>,
        out: Rc<Cell<usize>>,
    }

    impl Frontend for FakeFrontend {
        fn draw(&mut self, timeline: &LyricTimeline, _elapsed: Duration) -> Result<()> {
            self.drawn.push(timeline.current());
            self.out.set(self.drawn.len());
            Ok(())
        }
        fn wait_for_stop(&mut self, timeout: Duration) -> Result<bool> {
            self.now.set(self.now.get() + timeout);
            Ok(self.stop_after.is_some_and(|n| self.drawn.len() >= n))
        }
    }

    fn harness(length_ms: u64, stop_after: Option<usize>) -> (SyncOutcome, usize, bool) {
        let now = Rc::new(Cell::new(Duration::ZERO));
        let stopped = Rc::new(Cell::new(false));
        let frames = Rc::new(Cell::new(0));
        let playback = FakePlayback {
            now: Rc::clone(&now),
            length: Duration::from_millis(length_ms),
            stopped: Rc::clone(&stopped),
        };
        let frontend = FakeFrontend { now, drawn: Vec::new(), stop_after, out: Rc::clone(&frames) };
        let outcome = SyncLoop::new(playback, frontend, timeline(), Duration::from_millis(100))
            .run()
            .unwrap();
        (outcome, frames.get(), stopped.get())
    }

    #[test]
    fn runs_until_player_exits() {
        let (outcome, frames, stopped) = harness(5000, None);
        assert_eq!(outcome, SyncOutcome::Finished);
        assert_eq!(frames, 50);
        assert!(!stopped);
    }

    #[test]
    fn user_stop_kills_player() {
        let (outcome, frames, stopped) = harness(5000, Some(3));
        assert_eq!(outcome, SyncOutcome::Stopped);
        assert_eq!(frames, 3);
        assert!(stopped);
    }
}
