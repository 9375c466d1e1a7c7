//! Quoting of raw values for inclusion in a header clause.

use crate::error::Error;

const QUOTE: char = '"';
const ESCAPE: char = '\\';

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_token_char)
}

/// Appends `raw` to `buf` in a form that [`unquote`] turns back into `raw`.
///
/// Tokens are written as-is. Anything else is wrapped in double quotes, with
/// embedded quotes and backslashes escaped.
pub fn quote(buf: &mut String, raw: &str) {
    if is_token(raw) {
        buf.push_str(raw);
        return;
    }

    buf.push(QUOTE);
    for c in raw.chars() {
        if c == QUOTE || c == ESCAPE {
            buf.push(ESCAPE);
        }
        buf.push(c);
    }
    buf.push(QUOTE);
}

/// Reverses [`quote`]. Text that does not start with a double quote is
/// returned unchanged.
pub fn unquote(text: &str) -> Result<String, Error> {
    let body = match text.strip_prefix(QUOTE) {
        Some(body) => body,
        None => return Ok(text.to_string()),
    };

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(escaped) => result.push(escaped),
                None => return Err(Error::DanglingQuoteEscape(text.to_string())),
            },
            // The closing quote must end the text.
            QUOTE if chars.as_str().is_empty() => return Ok(result),
            QUOTE => return Err(Error::MalformedQuote(text.to_string())),
            _ => result.push(c),
        }
    }

    Err(Error::MalformedQuote(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use str_macro::str;

    #[test]
    fn quoting() {
        let inputs_and_expected = vec![
            ("abc", "abc"),
            ("1.2.3", "1.2.3"),
            ("a-b_c", "a-b_c"),
            ("", r#""""#),
            ("a b", r#""a b""#),
            ("a,b", r#""a,b""#),
            ("a;b", r#""a;b""#),
            (r"x\,y", r#""x\\,y""#),
            (r#"say "hi""#, r#""say \"hi\"""#),
            ("ünï", r#""ünï""#),
        ];

        for (input, expected) in inputs_and_expected {
            let mut buf = str!("=");
            quote(&mut buf, input);
            assert_eq!(format!("={}", expected), buf);

            assert_eq!(Ok(str!(input)), unquote(expected));
        }
    }

    #[test]
    fn unquote_errors() {
        let inputs_and_expected = vec![
            (r#"""#, Error::MalformedQuote(str!(r#"""#))),
            (r#""abc"#, Error::MalformedQuote(str!(r#""abc"#))),
            (r#""a"b""#, Error::MalformedQuote(str!(r#""a"b""#))),
            (r#""abc\"#, Error::DanglingQuoteEscape(str!(r#""abc\"#))),
        ];

        for (input, expected) in inputs_and_expected {
            assert_eq!(Err(expected), unquote(input));
        }
    }
}
