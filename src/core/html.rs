// src/core/html.rs
// Low-level markup helpers. Deliberately naive; the patent pages are generated
// HTML with upper-case tags and no scripts worth parsing.
// Tag names match ASCII case-insensitively.

use super::sanitize::collapse_whitespace;

/// Fast ASCII-only lowercasing. Byte offsets are preserved, so indices found in
/// the lowercased copy are valid in the original.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Remove every `<...>` tag. Whitespace is left as found.
pub fn strip_markup<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Strip tags, then collapse whitespace. The cleaning applied to every text field
/// except claims and description.
pub fn clean<S: AsRef<str>>(s: S) -> String {
    collapse_whitespace(&strip_markup(s))
}

/// Find the next complete tag block from `from` onwards.
/// A block runs from the start of the opening tag to the end of the *nearest*
/// closing tag, so a nested opener is swallowed into the outer block.
///
/// Example:
/// `<table ...> ... </table>`
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    next_block_in(s, &lc, &to_lower(open_tag), &to_lower(close_tag), from)
}

/// Every block of `open_tag ... close_tag`, in document order.
pub fn tag_blocks_ci<'a>(s: &'a str, open_tag: &str, close_tag: &str) -> Vec<&'a str> {
    let lc = to_lower(s);
    let open_lc = to_lower(open_tag);
    let close_lc = to_lower(close_tag);

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = next_block_in(s, &lc, &open_lc, &close_lc, pos) {
        out.push(&s[start..end]);
        pos = end;
    }
    out
}

fn next_block_in(s: &str, lc: &str, open_lc: &str, close_lc: &str, from: usize) -> Option<(usize, usize)> {
    // Locate the opening tag
    let start = lc.get(from..)?.find(open_lc)? + from;
    // Jump past the end of the opening tag
    let open_end = s[start..].find('>')? + start + 1;
    // Nearest closing tag wins
    let end_rel = lc[open_end..].find(close_lc)?;
    let end = open_end + end_rel + close_lc.len();
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_keeps_text_and_whitespace() {
        assert_eq!(strip_markup("<B>5,881,811</B>\n"), "5,881,811\n");
        assert_eq!(strip_markup(""), "");
        assert_eq!(clean("<TD>\n  <B>Lessar</B>  et al.\n</TD>"), "Lessar et al.");
    }

    #[test]
    fn blocks_are_non_greedy() {
        let doc = "<TABLE a><TR><TD><table b>x</TABLE> tail </table><TABLE c>y</TABLE>";
        let blocks = tag_blocks_ci(doc, "<table", "</table>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "<TABLE a><TR><TD><table b>x</TABLE>");
        assert_eq!(blocks[1], "<TABLE c>y</TABLE>");
    }

    #[test]
    fn next_block_from_offset() {
        let doc = "<tr>a</tr><TR>b</TR>";
        let (s, e) = next_tag_block_ci(doc, "<tr", "</tr>", 1).unwrap();
        assert_eq!(&doc[s..e], "<TR>b</TR>");
        assert!(next_tag_block_ci(doc, "<td", "</td>", 0).is_none());
    }

    #[test]
    fn unclosed_block_is_dropped() {
        assert!(tag_blocks_ci("<table><tr>", "<table", "</table>").is_empty());
    }
}
