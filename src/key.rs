//! Attribute key syntax.
//!
//! A typed key is `name:Type` or `name:List<Type>`, where the name is made of
//! `[-0-9A-Za-z._]` and the type is one of `String`, `Long`, `Double` or
//! `Version`. Whitespace is allowed around every token.

use crate::types::Type;

const TYPE_SEPARATOR: char = ':';
const LIST_PREFIX: &str = "List";

fn is_ws(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_'
}

fn parse_scalar_name(name: &str) -> Option<Type> {
    match name {
        "String" => Some(Type::Text),
        "Long" => Some(Type::Integer),
        "Double" => Some(Type::Real),
        "Version" => Some(Type::VersionId),
        _ => None,
    }
}

fn parse_type_spec(spec: &str) -> Option<Type> {
    match spec.strip_prefix(LIST_PREFIX) {
        Some(rest) => {
            let inner = rest
                .trim_start_matches(is_ws)
                .strip_prefix('<')?
                .strip_suffix('>')?
                .trim_matches(is_ws);

            parse_scalar_name(inner)?.plural()
        },
        None => parse_scalar_name(spec),
    }
}

/// Splits a typed key into its bare name and declared type.
/// Returns `None` if the key is not in the typed key syntax.
pub fn parse_typed_key(key: &str) -> Option<(&str, Type)> {
    let (name, spec) = key.split_once(TYPE_SEPARATOR)?;

    let name = name.trim_matches(is_ws);
    if name.is_empty() || !name.chars().all(is_name_char) {
        return None;
    }

    let ty = parse_type_spec(spec.trim_matches(is_ws))?;

    Some((name, ty))
}

/// Returns the directive name if the key is a directive (ends with `:`).
pub fn directive_name(key: &str) -> Option<&str> {
    key.strip_suffix(TYPE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_keys() {
        let inputs_and_expected = vec![
            ("a:String", Some(("a", Type::Text))),
            ("a:Long", Some(("a", Type::Integer))),
            ("a:Double", Some(("a", Type::Real))),
            ("a:Version", Some(("a", Type::VersionId))),
            ("a:List<String>", Some(("a", Type::TextList))),
            ("a:List<Long>", Some(("a", Type::IntegerList))),
            ("a:List<Double>", Some(("a", Type::RealList))),
            ("a:List<Version>", Some(("a", Type::VersionIdList))),
            ("bundle-version:Version", Some(("bundle-version", Type::VersionId))),
            ("os.name_2:String", Some(("os.name_2", Type::Text))),
            (" size : Long ", Some(("size", Type::Integer))),
            ("tags:List < String >", Some(("tags", Type::TextList))),
            ("tags :\tList<Version>\n", Some(("tags", Type::VersionIdList))),
        ];

        for (input, expected) in inputs_and_expected {
            let produced = parse_typed_key(input);
            assert_eq!(expected, produced, "input: {:?}", input);
        }
    }

    #[test]
    fn untyped_keys() {
        let inputs = vec![
            "a",
            "a:",
            ":Long",
            "a:long",
            "a:Integer",
            "a:List",
            "a:List<>",
            "a:List<List<Long>>",
            "a:List<Long",
            "a:ListLong>",
            "a:Long:String",
            "a b:Long",
            "a/b:Long",
            "ä:Long",
            "a:Long>",
            "",
        ];

        for input in inputs {
            assert_eq!(None, parse_typed_key(input), "input: {:?}", input);
        }
    }

    #[test]
    fn directives() {
        assert_eq!(Some("resolution"), directive_name("resolution:"));
        assert_eq!(Some(""), directive_name(":"));
        assert_eq!(None, directive_name("resolution"));
        assert_eq!(None, directive_name("a:Long"));
    }
}
