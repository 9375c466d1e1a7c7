//! Splitting and joining of multi-valued attribute values.
//!
//! Elements are separated by unescaped commas. A backslash makes the next
//! character literal, so `\,` and `\\` carry a comma or backslash inside an
//! element.

use crate::error::Error;

const SEPARATOR: char = ',';
const ESCAPE: char = '\\';

/// Splits a raw list value into its elements, resolving escapes.
///
/// An empty input yields a single empty element.
pub fn split_list_attribute(input: &str) -> Result<Vec<String>, Error> {
    let mut result = Vec::new();
    let mut builder = String::new();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(escaped) => builder.push(escaped),
                None => return Err(Error::UnterminatedEscape(input.to_string())),
            },
            SEPARATOR => result.push(std::mem::take(&mut builder)),
            _ => builder.push(c),
        }
    }

    result.push(builder);
    Ok(result)
}

/// Appends one list element to `buf`, escaping separators and escapes.
fn escape_list_element(buf: &mut String, element: &str) {
    for c in element.chars() {
        if c == ESCAPE || c == SEPARATOR {
            buf.push(ESCAPE);
        }
        buf.push(c);
    }
}

/// Joins elements into one raw list value. Inverse of [`split_list_attribute`]
/// for any non-empty sequence of elements.
pub(crate) fn join_list_elements<I, S>(elements: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();

    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            buf.push(SEPARATOR);
        }
        escape_list_element(&mut buf, element.as_ref());
    }

    buf
}
