//! A byte-range lexer for C comments and string/char literals.
//!
//! The array-bounds regex fallback (see `c.rs`) must not fire inside a
//! comment or a string literal, and must not mistake a declarator
//! (`int buf[10];`) for an access (`buf[i]`). Regex alone cannot track
//! comment/string nesting, so this module walks the source byte by byte.

/// Half-open byte ranges covered by `//` comments, `/* */` comments,
/// double-quoted strings, and single-quoted char literals.
pub fn comment_and_string_ranges(source: &str) -> Vec<(usize, usize)> {
    let bytes = source.as_bytes();
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                ranges.push((start, i));
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                ranges.push((start, i));
            }
            b'"' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                i = (i + 1).min(bytes.len());
                ranges.push((start, i));
            }
            b'\'' => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i] != b'\'' {
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                i = (i + 1).min(bytes.len());
                ranges.push((start, i));
            }
            _ => i += 1,
        }
    }
    ranges
}

pub fn position_in_ranges(pos: usize, ranges: &[(usize, usize)]) -> bool {
    ranges.iter().any(|&(start, end)| pos >= start && pos < end)
}

/// A `name[digits]` match is a declarator, not an access, when the next
/// non-whitespace byte after it is `;` — e.g. `int buf[10];` versus
/// `x = buf[10];`.
pub fn is_declarator_context(source: &str, match_end: usize) -> bool {
    source[match_end..]
        .chars()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| c == ';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_line_and_block_comments() {
        let src = "int x; // comment\n/* block\ncomment */\nint y;";
        let ranges = comment_and_string_ranges(src);
        assert!(position_in_ranges(src.find("comment\n").unwrap(), &ranges));
        assert!(!position_in_ranges(src.find("int y").unwrap(), &ranges));
    }

    #[test]
    fn skips_escaped_quotes_in_strings() {
        let src = r#"char *s = "a\"b"; int z;"#;
        let ranges = comment_and_string_ranges(src);
        let quote_pos = src.find('"').unwrap();
        assert!(position_in_ranges(quote_pos + 1, &ranges));
        assert!(!position_in_ranges(src.find("int z").unwrap(), &ranges));
    }

    #[test]
    fn bracket_directly_before_semicolon_reads_as_declarator() {
        // `]` immediately followed by `;` is treated as a declaration, not
        // an access — this also swallows a bare trailing read like
        // `x = buf[10];`, a known false negative inherited from the
        // original heuristic.
        let src = "int buf[10];";
        let end = src.find("[10];").unwrap() + "[10]".len();
        assert!(is_declarator_context(src, end));
    }

    #[test]
    fn bracket_followed_by_assignment_is_not_declarator() {
        let src = "buf[10] = 1;";
        let end = src.find("[10]").unwrap() + "[10]".len();
        assert!(!is_declarator_context(src, end));
    }
}
