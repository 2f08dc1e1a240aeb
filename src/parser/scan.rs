//! Low-level scanning helpers for Python source text.
//!
//! Everything here is string-literal aware: brackets inside `"..."`,
//! `'...'` or triple-quoted strings never count toward nesting depth,
//! and `#` comments are ignored outside strings.

/// Tracks bracket depth and string state across physical lines.
#[derive(Debug, Default)]
pub struct ScanState {
    depth: i32,
    /// Open string: quote character and whether it is triple-quoted.
    string: Option<(char, bool)>,
    /// Set when a closing bracket appears without a matching opener.
    unbalanced: bool,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one physical line, updating depth and string state.
    pub fn feed(&mut self, line: &str) {
        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if let Some((quote, triple)) = self.string {
                if c == '\\' && !triple {
                    i += 2;
                    continue;
                }
                if c == quote {
                    if triple {
                        if i + 2 < chars.len() && chars[i + 1] == quote && chars[i + 2] == quote {
                            self.string = None;
                            i += 3;
                            continue;
                        }
                    } else {
                        self.string = None;
                    }
                }
                i += 1;
                continue;
            }

            match c {
                '#' => break,
                '\'' | '"' => {
                    if i + 2 < chars.len() && chars[i + 1] == c && chars[i + 2] == c {
                        self.string = Some((c, true));
                        i += 3;
                        continue;
                    }
                    self.string = Some((c, false));
                }
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => {
                    self.depth -= 1;
                    if self.depth < 0 {
                        self.unbalanced = true;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        // A single-quoted string cannot span a physical line
        if let Some((_, false)) = self.string {
            self.string = None;
        }
    }

    /// True when the statement fed so far forms a complete logical line.
    pub fn complete(&self) -> bool {
        self.depth <= 0 && self.string.is_none()
    }

    /// True once a closing bracket without an opener was seen.
    pub fn unbalanced(&self) -> bool {
        self.unbalanced
    }

    /// True while inside an unterminated string or open bracket.
    pub fn pending(&self) -> bool {
        self.depth > 0 || self.string.is_some()
    }
}

/// Split `text` on `sep` occurrences at bracket depth zero, outside strings.
pub fn split_top_level(text: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut string: Option<(char, bool)> = None;
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if let Some((quote, triple)) = string {
            current.push(c);
            if c == '\\' && !triple {
                if i + 1 < chars.len() {
                    current.push(chars[i + 1]);
                }
                i += 2;
                continue;
            }
            if c == quote {
                if triple {
                    if i + 2 < chars.len() && chars[i + 1] == quote && chars[i + 2] == quote {
                        current.push(chars[i + 1]);
                        current.push(chars[i + 2]);
                        string = None;
                        i += 3;
                        continue;
                    }
                } else {
                    string = None;
                }
            }
            i += 1;
            continue;
        }

        match c {
            '\'' | '"' => {
                if i + 2 < chars.len() && chars[i + 1] == c && chars[i + 2] == c {
                    string = Some((c, true));
                    current.push(c);
                    current.push(chars[i + 1]);
                    current.push(chars[i + 2]);
                    i += 3;
                    continue;
                }
                string = Some((c, false));
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(c);
            }
            _ if c == sep && depth == 0 => {
                parts.push(current.clone());
                current.clear();
            }
            _ => current.push(c),
        }
        i += 1;
    }

    parts.push(current);
    parts
}

/// Find the byte index of the first `needle` at depth zero, outside strings.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut string: Option<char> = None;
    let mut prev_escape = false;

    for (idx, c) in text.char_indices() {
        if let Some(quote) = string {
            if prev_escape {
                prev_escape = false;
            } else if c == '\\' {
                prev_escape = true;
            } else if c == quote {
                string = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => string = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == needle && depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Given the byte index of an opening bracket, find its matching closer.
pub fn find_matching(text: &str, open: usize) -> Option<usize> {
    let open_char = text[open..].chars().next()?;
    let close_char = match open_char {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => return None,
    };

    let mut depth = 0i32;
    let mut string: Option<char> = None;
    let mut prev_escape = false;

    for (idx, c) in text[open..].char_indices() {
        if let Some(quote) = string {
            if prev_escape {
                prev_escape = false;
            } else if c == '\\' {
                prev_escape = true;
            } else if c == quote {
                string = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => string = Some(c),
            c if c == open_char => depth += 1,
            c if c == close_char => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ignores_nested_commas() {
        let parts = split_top_level("a, b=[1, 2], c={'x': 1}", ',');
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].trim(), "a");
        assert_eq!(parts[1].trim(), "b=[1, 2]");
        assert_eq!(parts[2].trim(), "c={'x': 1}");
    }

    #[test]
    fn test_split_ignores_commas_in_strings() {
        let parts = split_top_level(r#"label="a, b", required=True"#, ',');
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].trim(), r#"label="a, b""#);
    }

    #[test]
    fn test_find_top_level_skips_brackets() {
        let idx = find_top_level("Dict[str, Any] = None", '=').unwrap();
        assert_eq!(&"Dict[str, Any] = None"[idx..=idx], "=");
        assert!(find_top_level("[a=b]", '=').is_none());
    }

    #[test]
    fn test_find_matching_paren() {
        let text = "f(a, (b), 'c)')x";
        let close = find_matching(text, 1).unwrap();
        assert_eq!(&text[close..=close], ")");
        assert_eq!(close, text.len() - 2);
    }

    #[test]
    fn test_scan_state_multiline_call() {
        let mut state = ScanState::new();
        state.feed("@activity(name=\"X\",");
        assert!(state.pending());
        state.feed("    tags=[\"a\"])");
        assert!(state.complete());
    }

    #[test]
    fn test_scan_state_triple_quote_spans_lines() {
        let mut state = ScanState::new();
        state.feed("\"\"\"Docstring with (unclosed paren");
        assert!(state.pending());
        state.feed("still inside\"\"\"");
        assert!(state.complete());
    }

    #[test]
    fn test_scan_state_unbalanced() {
        let mut state = ScanState::new();
        state.feed("x = foo)");
        assert!(state.unbalanced());
    }

    #[test]
    fn test_scan_state_comment_hides_bracket() {
        let mut state = ScanState::new();
        state.feed("x = 1  # not open (");
        assert!(state.complete());
    }
}
