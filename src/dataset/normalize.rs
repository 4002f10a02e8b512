use regex::Regex;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn disallowed_re() -> &'static Regex {
    // Everything outside the Thai block, ASCII letters, digits, whitespace
    // and basic punctuation is stripped.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\u{0E00}-\u{0E7F}a-zA-Z0-9\s.,\-()]").unwrap())
}

/// Clean free text for the name and method fields.
///
/// Collapses whitespace runs to a single space, strips characters outside the
/// allow-list and trims the ends. Newlines collapse along with other
/// whitespace, so this is not suitable for ingredient lists.
pub fn clean_text(text: &str) -> String {
    let collapsed = whitespace_re().replace_all(text, " ");
    let stripped = disallowed_re().replace_all(&collapsed, "");
    stripped.trim().to_string()
}

/// Reformat an ingredient list into one dash-prefixed item per line.
///
/// Blank lines are dropped, surviving lines keep their order and gain a
/// leading `- ` marker when not already present.
pub fn normalize_ingredient_list(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('-') {
                line.to_string()
            } else {
                format!("- {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
