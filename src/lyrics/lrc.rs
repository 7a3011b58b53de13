//! LRC parsing.
//!
//! Accepts the loose LRC found in the wild: metadata tags are skipped,
//! malformed time tags are dropped rather than reported, and a line may carry
//! several time tags when a chorus repeats.

use std::time::Duration;

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Offset from the start of the song.
    pub timestamp: Duration,
    /// Text shown for this line.
    pub text: String,
}

impl LyricLine {
    /// Create a line at `secs` seconds.
    pub fn new(secs: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp: Duration::from_secs_f64(secs),
            text: text.into(),
        }
    }
}

/// Parse LRC content into lines sorted by timestamp.
pub fn parse_lrc(content: &str) -> Vec<LyricLine> {
    let mut lines = Vec::new();

    for raw in content.lines() {
        let line = raw.trim();
        if !line.starts_with('[') || !line.contains(']') {
            continue;
        }

        let (tags, text) = split_tags(line);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        for tag in tags {
            if let Some(timestamp) = parse_timestamp(tag) {
                lines.push(LyricLine { timestamp, text: text.to_string() });
            }
        }
    }

    // Stable: lines sharing a timestamp keep file order
    lines.sort_by_key(|l| l.timestamp);
    lines
}

/// Split leading `[..]` tags from the text that follows them.
///
/// The first tag is always taken. Later tags are taken only while they are
/// timestamps, so a label such as `[Chorus]` stays part of the text.
fn split_tags(line: &str) -> (Vec<&str>, &str) {
    let mut tags = Vec::new();
    let mut rest = line;
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(end) = inner.find(']') else { break };
        let tag = &inner[..end];
        if !tags.is_empty() && parse_timestamp(tag).is_none() {
            break;
        }
        tags.push(tag);
        rest = &inner[end + 1..];
    }
    (tags, rest)
}

/// Parse `mm:ss(.xx)`. Tags starting with a letter are metadata.
fn parse_timestamp(tag: &str) -> Option<Duration> {
    let first = tag.chars().next()?;
    if first.is_alphabetic() {
        return None;
    }

    let mut parts = tag.split(':');
    let minutes: f64 = parts.next()?.trim().parse().ok()?;
    let seconds: f64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Duration::try_from_secs_f64(minutes.mul_add(60.0, seconds)).ok()
}

/// Convert unsynchronized lyrics to LRC with every line at `00:00.00`.
pub fn plain_to_lrc(plain: &str) -> String {
    plain
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("[00:00.00] {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format an offset as `mm:ss`.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
