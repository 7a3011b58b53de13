use std::fmt::Write;

use crate::constants::render::RULE_WIDTH;
use crate::lyrics::parse_lrc;

/// Untimed lyrics page for `--showcase`.
///
/// Content that does not parse as LRC is shown raw.
pub fn showcase_text(content: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\n📜 LYRICS\n{rule}\n\n");

    let lines = parse_lrc(content);
    if lines.is_empty() {
        out.push_str(content);
        out.push('\n');
    } else {
        for line in &lines {
            let _ = writeln!(out, "  {}", line.text);
        }
    }

    let _ = write!(out, "\n{rule}");
    out
}
