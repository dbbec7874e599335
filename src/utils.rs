fn char_count_to_byte_pos(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    &text[..char_count_to_byte_pos(text, max_chars)]
}

pub fn strip_double_quotes(text: &str) -> String {
    text.trim().replace('"', "")
}

/// Expands `\n` and `\t` typed on a single input line; `\\` yields a backslash.
pub fn unescape_line(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
