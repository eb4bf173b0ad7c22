use regex::Regex;
use std::sync::LazyLock;

struct Rule {
    pattern: LazyLock<Regex>,
    replacement: &'static str,
}

macro_rules! rule {
    ($re:expr, $rep:expr) => {
        Rule {
            pattern: LazyLock::new(|| Regex::new($re).unwrap()),
            replacement: $rep,
        }
    };
}

// Order matters: emphasis goes first, fenced blocks are removed before the
// inline-code rule, which would otherwise consume the ``` markers.
static RULES: [Rule; 11] = [
    rule!(r"\*\*(.+?)\*\*", "${1}"),
    rule!(r"__(.+?)__", "${1}"),
    rule!(r"\*(.+?)\*", "${1}"),
    rule!(r"_(.+?)_", "${1}"),
    rule!(r"(?m)^#{1,6}\s*", ""),
    rule!(r"(?m)^\s*[-*+]\s+", ""),
    rule!(r"(?m)^\s*\d+\.\s+", ""),
    rule!(r"(?m)^\s*>\s+", ""),
    rule!(r"```[\s\S]*?```", ""),
    rule!(r"`(.+?)`", "${1}"),
    rule!(r"\n{3,}", "\n\n"),
];

/// Turns Markdown advice text into plain text for display.
///
/// Fenced code blocks are dropped together with their content. Because the
/// emphasis rules run first, `*` and `_` pairs inside a fence are already
/// rewritten by the time the fence is removed.
pub fn strip_markdown(md: &str) -> String {
    let mut text = md.to_string();
    for rule in RULES.iter() {
        text = rule
            .pattern
            .replace_all(&text, rule.replacement)
            .into_owned();
    }
    text.trim().to_string()
}
