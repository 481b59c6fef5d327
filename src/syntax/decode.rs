// src/syntax/decode.rs
//! Decoding of C/C++ literal and comment text.
//!
//! Escape sequences are resolved to the characters they denote, except for
//! non-whitespace control characters (`\0`, `\a`, `\x01`, ...) which keep their
//! escaped source spelling so patterns stay printable.

/// Decodes a string literal token, including any encoding prefix, raw-string
/// delimiters and user-defined literal suffix.
#[must_use]
pub fn string_literal(raw: &str) -> String {
    let Some(open) = raw.find('"') else {
        return raw.to_string();
    };
    let prefix = &raw[..open];
    let rest = &raw[open + 1..];

    if prefix.ends_with('R') {
        return raw_body(rest);
    }

    let body = match rest.rfind('"') {
        Some(close) => &rest[..close],
        None => rest,
    };
    unescape(body)
}

/// Decodes a character literal token (`'x'`, `L'\n'`, ...).
#[must_use]
pub fn char_literal(raw: &str) -> String {
    let Some(open) = raw.find('\'') else {
        return raw.to_string();
    };
    let rest = &raw[open + 1..];
    let body = match rest.rfind('\'') {
        Some(close) => &rest[..close],
        None => rest,
    };
    unescape(body)
}

/// Strips comment markers and `*` gutters, joining lines with single spaces.
#[must_use]
pub fn comment(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(line) = trimmed.strip_prefix("//") {
        return line.trim_start_matches('/').trim().to_string();
    }

    let inner = trimmed
        .strip_prefix("/*")
        .map(|s| s.strip_suffix("*/").unwrap_or(s))
        .unwrap_or(trimmed);

    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.trim_start_matches('*').trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn raw_body(rest: &str) -> String {
    let Some(paren) = rest.find('(') else {
        return rest.to_string();
    };
    let delimiter = &rest[..paren];
    let closing = format!("){delimiter}\"");
    let content = &rest[paren + 1..];
    match content.rfind(&closing) {
        Some(end) => content[..end].to_string(),
        None => content.to_string(),
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            out.push('\\');
            break;
        };

        let decoded = match esc {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'v' => Some('\u{0B}'),
            '\\' | '"' | '\'' | '?' => Some(esc),
            '\n' => continue,
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|&(_, d)| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value)
            }
            'x' => take_hex(&mut chars, usize::MAX),
            'u' => take_hex(&mut chars, 4),
            'U' => take_hex(&mut chars, 8),
            _ => None,
        };

        let end = chars.peek().map_or(body.len(), |&(idx, _)| idx);
        match decoded {
            Some(ch) if !ch.is_control() || ch.is_whitespace() => out.push(ch),
            _ => out.push_str(&body[start..end]),
        }
    }

    out
}

fn take_hex<I>(chars: &mut std::iter::Peekable<I>, max: usize) -> Option<char>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value: u32 = 0;
    let mut digits = 0;
    while digits < max {
        let Some(d) = chars.peek().and_then(|&(_, c)| c.to_digit(16)) else {
            break;
        };
        value = value.checked_mul(16)?.checked_add(d)?;
        chars.next();
        digits += 1;
    }
    if digits == 0 {
        return None;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_prefixed_strings() {
        assert_eq!(string_literal(r#""hello world""#), "hello world");
        assert_eq!(string_literal(r#"u8"café""#), "café");
        assert_eq!(string_literal(r#"L"wide""#), "wide");
    }

    #[test]
    fn common_escapes_resolve() {
        assert_eq!(string_literal(r#""a\tb\nc""#), "a\tb\nc");
        assert_eq!(string_literal(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(string_literal(r#""\x41\102""#), "AB");
    }

    #[test]
    fn control_escapes_keep_source_form() {
        assert_eq!(
            string_literal(r#""may not contain '\0', given""#),
            "may not contain '\\0', given"
        );
    }

    #[test]
    fn raw_strings_are_unwrapped() {
        assert_eq!(string_literal(r#"R"(no \n escapes)""#), r"no \n escapes");
        assert_eq!(string_literal(r#"R"xy(a)" b)xy""#), r#"a)" b"#);
    }

    #[test]
    fn user_defined_suffix_is_dropped() {
        assert_eq!(string_literal(r#""test.user"_sd"#), "test.user");
    }

    #[test]
    fn char_literals() {
        assert_eq!(char_literal("'_'"), "_");
        assert_eq!(char_literal(r"'\n'"), "\n");
    }

    #[test]
    fn block_comment_gutters_are_stripped() {
        let raw = "/*\n * Pre-checks the pipeline\n * stages in order.\n */";
        assert_eq!(comment(raw), "Pre-checks the pipeline stages in order.");
        assert_eq!(comment("// trailing note here"), "trailing note here");
        assert_eq!(comment("/// doc line"), "doc line");
    }
}
