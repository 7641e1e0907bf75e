// file: src/parser/literal.rs
// description: rewrites a javascript object literal into strict json
// reference: ECMA-262 object initializer grammar, restricted to what index builders emit

use crate::error::FormatError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Frame {
    Object { expect_key: bool },
    Array,
}

/// Converts the body of a legacy `searchindex.js` into JSON.
///
/// Older builders emit bare identifier keys (`docnames:[...]`, `sphinx:56`)
/// and quote only keys that are not valid identifiers. Quoted strings keep
/// their JSON escapes; JavaScript-only escapes are rewritten to JSON. Input
/// that is already strict JSON comes out unchanged.
pub fn to_json(body: &str) -> Result<String, FormatError> {
    let mut out = String::with_capacity(body.len() + body.len() / 8);
    let mut stack: Vec<Frame> = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => out.push(c),
            '"' => {
                out.push('"');
                copy_double_quoted(&mut chars, &mut out, offset)?;
                consume_key(&mut stack);
            }
            '\'' => {
                out.push('"');
                requote_single_quoted(&mut chars, &mut out, offset)?;
                consume_key(&mut stack);
            }
            '{' => {
                out.push(c);
                stack.push(Frame::Object { expect_key: true });
            }
            '[' => {
                out.push(c);
                stack.push(Frame::Array);
            }
            '}' => {
                match stack.pop() {
                    Some(Frame::Object { .. }) => {}
                    _ => return Err(literal_error(offset, "unexpected `}`")),
                }
                out.push(c);
            }
            ']' => {
                match stack.pop() {
                    Some(Frame::Array) => {}
                    _ => return Err(literal_error(offset, "unexpected `]`")),
                }
                out.push(c);
            }
            ',' => {
                if let Some(Frame::Object { expect_key }) = stack.last_mut() {
                    *expect_key = true;
                }
                out.push(c);
            }
            ':' => out.push(c),
            c if is_token_char(c) => {
                let mut token = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_token_char(next) {
                        break;
                    }
                    token.push(next);
                    chars.next();
                }

                if matches!(stack.last(), Some(Frame::Object { expect_key: true })) {
                    out.push('"');
                    out.push_str(&token);
                    out.push('"');
                    consume_key(&mut stack);
                } else {
                    out.push_str(&token);
                }
            }
            other => {
                return Err(literal_error(
                    offset,
                    &format!("unexpected character `{}`", other),
                ));
            }
        }
    }

    if !stack.is_empty() {
        return Err(literal_error(
            body.len(),
            &format!("{} unclosed bracket(s)", stack.len()),
        ));
    }

    Ok(out)
}

fn consume_key(stack: &mut [Frame]) {
    if let Some(Frame::Object { expect_key }) = stack.last_mut() {
        *expect_key = false;
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '.' | '-' | '+')
}

fn copy_double_quoted<I>(chars: &mut I, out: &mut String, start: usize) -> Result<(), FormatError>
where
    I: Iterator<Item = (usize, char)>,
{
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => push_escape(chars, out, start)?,
            '"' => {
                out.push('"');
                return Ok(());
            }
            _ => out.push(c),
        }
    }
    Err(literal_error(start, "unterminated string"))
}

fn requote_single_quoted<I>(
    chars: &mut I,
    out: &mut String,
    start: usize,
) -> Result<(), FormatError>
where
    I: Iterator<Item = (usize, char)>,
{
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => push_escape(chars, out, start)?,
            '"' => out.push_str("\\\""),
            '\'' => {
                out.push('"');
                return Ok(());
            }
            _ => out.push(c),
        }
    }
    Err(literal_error(start, "unterminated string"))
}

/// Writes the JSON form of the escape sequence following a backslash.
///
/// JSON escapes are copied as they are. JavaScript-only forms (`\'`, `\xNN`,
/// `\v`, `\0`, line continuations, identity escapes) are rewritten.
fn push_escape<I>(chars: &mut I, out: &mut String, start: usize) -> Result<(), FormatError>
where
    I: Iterator<Item = (usize, char)>,
{
    let (_, escaped) = chars
        .next()
        .ok_or_else(|| literal_error(start, "unterminated escape"))?;

    match escaped {
        '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u' => {
            out.push('\\');
            out.push(escaped);
        }
        'x' => {
            let mut hex = String::with_capacity(2);
            for _ in 0..2 {
                match chars.next() {
                    Some((_, digit)) if digit.is_ascii_hexdigit() => hex.push(digit),
                    _ => return Err(literal_error(start, "invalid \\x escape")),
                }
            }
            out.push_str("\\u00");
            out.push_str(&hex);
        }
        'v' => out.push_str("\\u000b"),
        '0' => out.push_str("\\u0000"),
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
        other => out.push(other),
    }
    Ok(())
}

fn literal_error(offset: usize, message: &str) -> FormatError {
    FormatError::Literal {
        offset,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_keys_are_quoted() {
        let json = to_json(r#"{docnames:["a"],envversion:{sphinx:56,"sphinx.domains.c":2}}"#)
            .unwrap();
        assert_eq!(
            json,
            r#"{"docnames":["a"],"envversion":{"sphinx":56,"sphinx.domains.c":2}}"#
        );
    }

    #[test]
    fn test_values_are_left_alone() {
        let json = to_json(r#"{terms:{adoni:[3,4],"0":-1},flag:true,none:null}"#).unwrap();
        assert_eq!(
            json,
            r#"{"terms":{"adoni":[3,4],"0":-1},"flag":true,"none":null}"#
        );
    }

    #[test]
    fn test_strict_json_passes_through() {
        let source = r#"{"docnames": ["API", "index"], "titles": ["A \"quoted\" title"]}"#;
        assert_eq!(to_json(source).unwrap(), source);
    }

    #[test]
    fn test_colon_inside_string_is_not_a_key() {
        let json = to_json(r#"{objtypes:{"0":"py:module"}}"#).unwrap();
        assert_eq!(json, r#"{"objtypes":{"0":"py:module"}}"#);
    }

    #[test]
    fn test_single_quoted_strings_are_requoted() {
        let json = to_json(r#"{'it\'s':'say "hi"'}"#).unwrap();
        assert_eq!(json, r#"{"it's":"say \"hi\""}"#);
    }

    #[test]
    fn test_javascript_escapes_become_json() {
        let json = to_json(r#"{docnames:["it\'s","\x41b","tab\v","nul\0"]}"#).unwrap();
        assert_eq!(
            json,
            r#"{"docnames":["it's","\u0041b","tab\u000b","nul\u0000"]}"#
        );

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["docnames"][0], "it's");
        assert_eq!(value["docnames"][1], "Ab");
    }

    #[test]
    fn test_json_escapes_are_kept() {
        let source = r#"{"titles":["a\\b \u00e9 \n \/"]}"#;
        assert_eq!(to_json(source).unwrap(), source);
    }

    #[test]
    fn test_malformed_hex_escape() {
        assert!(matches!(
            to_json(r#"{docnames:["\xZ1"]}"#),
            Err(FormatError::Literal { .. })
        ));
    }

    #[test]
    fn test_unbalanced_input_is_rejected() {
        assert!(matches!(
            to_json("{docnames:[\"a\"]"),
            Err(FormatError::Literal { .. })
        ));
        assert!(matches!(
            to_json("{docnames:[\"a\"}"),
            Err(FormatError::Literal { .. })
        ));
        assert!(matches!(
            to_json("{docnames:[\"a]}"),
            Err(FormatError::Literal { .. })
        ));
    }

    #[test]
    fn test_unexpected_character() {
        let err = to_json("{a:1;b:2}").unwrap_err();
        assert_eq!(
            err,
            FormatError::Literal {
                offset: 4,
                message: "unexpected character `;`".to_string()
            }
        );
    }
}
