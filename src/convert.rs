//! Conversion between raw attribute strings and typed values.

use std::str::FromStr;

use crate::error::Error;
use crate::split::{join_list_elements, split_list_attribute};
use crate::types::{Input, Scalar, Type, Value, Version};

fn parse_integer(raw: &str) -> Result<i64, Error> {
    raw.trim().parse().map_err(|_| Error::NumberFormat(Type::Integer, raw.to_string()))
}

fn parse_real(raw: &str) -> Result<f64, Error> {
    raw.trim().parse().map_err(|_| Error::NumberFormat(Type::Real, raw.to_string()))
}

fn parse_list<T, F>(raw: &str, parse: F) -> Result<Vec<T>, Error>
where
    F: Fn(&str) -> Result<T, Error>,
{
    split_list_attribute(raw)?.iter().map(|element| parse(element.as_str())).collect()
}

/// Decodes a raw attribute string as the given type.
///
/// List values are split on unescaped commas first and every element is
/// decoded as the list's element type.
pub fn decode(ty: Type, raw: &str) -> Result<Value, Error> {
    let value = match ty {
        Type::Text => Value::Text(raw.to_string()),
        Type::Integer => Value::Integer(parse_integer(raw)?),
        Type::Real => Value::Real(parse_real(raw)?),
        Type::VersionId => Value::VersionId(Version::from_str(raw)?),
        Type::TextList => Value::TextList(split_list_attribute(raw)?),
        Type::IntegerList => Value::IntegerList(parse_list(raw, parse_integer)?),
        Type::RealList => Value::RealList(parse_list(raw, parse_real)?),
        Type::VersionIdList => Value::VersionIdList(parse_list(raw, Version::from_str)?),
    };

    Ok(value)
}

/// Decodes a raw attribute string using a type given by name, such as
/// `"List<Long>"`. Unknown type names leave the value as text.
pub fn decode_named(type_name: &str, raw: &str) -> Result<Value, Error> {
    match Type::from_str(type_name) {
        Ok(ty) => decode(ty, raw),
        Err(_) => Ok(Value::Text(raw.to_string())),
    }
}

/// Encodes an input into its declared type and raw string.
/// Returns `None` for a null input.
pub(crate) fn encode(input: &Input) -> Option<(Type, String)> {
    match input {
        Input::Null => None,
        Input::Scalar(scalar) => Some((scalar.kind(), scalar.to_string())),
        Input::Sequence(elements) => Some(encode_sequence(elements.iter().flatten())),
    }
}

fn encode_sequence<'a, I>(elements: I) -> (Type, String)
where
    I: Iterator<Item = &'a Scalar>,
{
    let mut elements = elements.peekable();
    let ty = elements.peek().map_or(Type::TextList, |first| first.list_kind());

    (ty, join_list_elements(elements.map(Scalar::to_string)))
}
