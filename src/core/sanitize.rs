// src/core/sanitize.rs

/// Collapse every whitespace run (newlines included) into a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// The results pages hand back links with `&quot;` where the query had a literal
/// quote. Requests built from the escaped form come back empty.
pub fn decode_quotes(s: &str) -> String {
    s.replace("&quot;", "\"")
}

/// `Some(s)` unless `s` is empty. Unset beats an empty placeholder.
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Digits only, e.g. `"RE12,345"` → `"12345"`.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trim the separators that sit between repeated `Name (City)` groups.
pub fn trim_list_separators(s: &str) -> &str {
    s.trim_matches(|c: char| c == ',' || c == ';' || c.is_whitespace())
}
