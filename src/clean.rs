//! Last-resort sanitizer for generated dialogue text.
//!
//! Best-effort: lines that contain a `:` pass through even when they
//! are not well-formed `Speaker: utterance` lines.

use regex::Regex;
use std::sync::OnceLock;

static BOLD: OnceLock<Regex> = OnceLock::new();
static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();

fn bold() -> &'static Regex {
    BOLD.get_or_init(|| Regex::new(r"\*\*").unwrap())
}

fn parenthetical() -> &'static Regex {
    PARENTHETICAL.get_or_init(|| Regex::new(r"\s*\([^)]*\)").unwrap())
}

/// Strips markdown bold markers and parenthetical stage directions,
/// then keeps only lines containing a `:` separator. Returns `None`
/// when the input is `None` or nothing survives.
pub fn dialogue(text: Option<&str>) -> Option<String> {
    let text = text?;

    let stripped = bold().replace_all(text, "");
    let stripped = parenthetical().replace_all(&stripped, "");

    let kept: Vec<&str> = stripped.lines().filter(|line| line.contains(':')).collect();
    let joined = kept.join("\n").trim().to_string();

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
