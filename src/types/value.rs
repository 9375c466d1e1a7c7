//! Decoded attribute values and the inputs accepted for typed insertion.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use thiserror::Error;

use crate::types::{Type, Version};

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
#[error("cannot convert value of type {0} into target type")]
pub struct CannotConvert(pub Type);

/// A single element of typed input: one of the scalar attribute types.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Real(f64),
    VersionId(Version),
}

impl Scalar {
    pub fn kind(&self) -> Type {
        match self {
            Self::Text(..) => Type::Text,
            Self::Integer(..) => Type::Integer,
            Self::Real(..) => Type::Real,
            Self::VersionId(..) => Type::VersionId,
        }
    }

    /// The list type whose elements have this scalar's type.
    pub fn list_kind(&self) -> Type {
        match self {
            Self::Text(..) => Type::TextList,
            Self::Integer(..) => Type::IntegerList,
            Self::Real(..) => Type::RealList,
            Self::VersionId(..) => Type::VersionIdList,
        }
    }
}

/// Writes the canonical string encoding, the form stored as a raw value.
impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            // Debug formatting keeps a fractional part on whole numbers.
            Self::Real(r) => write!(f, "{:?}", r),
            Self::VersionId(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Version> for Scalar {
    fn from(value: Version) -> Self {
        Self::VersionId(value)
    }
}

/// A value handed to typed insertion.
///
/// A sequence takes its list type from its first present element; missing
/// elements are skipped when encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Null,
    Scalar(Scalar),
    Sequence(Vec<Option<Scalar>>),
}

impl From<Scalar> for Input {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for Input {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i32> for Input {
    fn from(value: i32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<u32> for Input {
    fn from(value: u32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<Version> for Input {
    fn from(value: Version) -> Self {
        Self::Scalar(value.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Input {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(|v| Some(v.into())).collect())
    }
}

/// A raw attribute value decoded through its declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    VersionId(Version),
    TextList(Vec<String>),
    IntegerList(Vec<i64>),
    RealList(Vec<f64>),
    VersionIdList(Vec<Version>),
}

impl Value {
    pub fn kind(&self) -> Type {
        match self {
            Self::Text(..) => Type::Text,
            Self::Integer(..) => Type::Integer,
            Self::Real(..) => Type::Real,
            Self::VersionId(..) => Type::VersionId,
            Self::TextList(..) => Type::TextList,
            Self::IntegerList(..) => Type::IntegerList,
            Self::RealList(..) => Type::RealList,
            Self::VersionIdList(..) => Type::VersionIdList,
        }
    }
}

/// A Rust type that a decoded attribute value can be extracted into, tied to
/// the attribute type it must be declared with.
pub trait DataType: TryFrom<Value, Error = CannotConvert> {
    const TYPE: Type;
}

macro_rules! data_type {
    ($target:ty, $variant:ident) => {
        impl From<$target> for Value {
            fn from(value: $target) -> Self {
                Self::$variant(value)
            }
        }

        impl TryFrom<Value> for $target {
            type Error = CannotConvert;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    _ => Err(CannotConvert(value.kind())),
                }
            }
        }

        impl DataType for $target {
            const TYPE: Type = Type::$variant;
        }
    };
}

data_type!(String, Text);
data_type!(i64, Integer);
data_type!(f64, Real);
data_type!(Version, VersionId);
data_type!(Vec<String>, TextList);
data_type!(Vec<i64>, IntegerList);
data_type!(Vec<f64>, RealList);
data_type!(Vec<Version>, VersionIdList);

#[cfg(test)]
mod tests {
    use super::*;

    use str_macro::str;

    #[test]
    fn scalar_display() {
        let inputs_and_expected = vec![
            (Scalar::from("a,b"), "a,b"),
            (Scalar::from(-27i64), "-27"),
            (Scalar::from(3.5), "3.5"),
            (Scalar::from(3.0), "3.0"),
            (Scalar::from(0.1), "0.1"),
            (Scalar::from(Version::new(1, 2, 3)), "1.2.3"),
        ];

        for (input, expected) in inputs_and_expected {
            assert_eq!(expected, input.to_string());
        }
    }

    #[test]
    fn scalar_kinds() {
        let inputs_and_expected = vec![
            (Scalar::from(str!("x")), Type::Text, Type::TextList),
            (Scalar::from(1i32), Type::Integer, Type::IntegerList),
            (Scalar::from(1.5), Type::Real, Type::RealList),
            (Scalar::from(Version::default()), Type::VersionId, Type::VersionIdList),
        ];

        for (input, expected_kind, expected_list_kind) in inputs_and_expected {
            assert_eq!(expected_kind, input.kind());
            assert_eq!(expected_list_kind, input.list_kind());
            assert_eq!(Some(expected_list_kind), expected_kind.plural());
        }
    }

    #[test]
    fn input_from_vec() {
        let produced = Input::from(vec![1i64, 2, 3]);
        let expected = Input::Sequence(vec![
            Some(Scalar::Integer(1)),
            Some(Scalar::Integer(2)),
            Some(Scalar::Integer(3)),
        ]);
        assert_eq!(expected, produced);
    }

    #[test]
    fn try_from_value() {
        assert_eq!(Ok(27), i64::try_from(Value::Integer(27)));
        assert_eq!(Err(CannotConvert(Type::Text)), i64::try_from(Value::Text(str!("27"))));
        assert_eq!(
            Ok(vec![str!("a"), str!("b")]),
            Vec::<String>::try_from(Value::TextList(vec![str!("a"), str!("b")])),
        );
        assert_eq!(
            Err(CannotConvert(Type::IntegerList)),
            Vec::<f64>::try_from(Value::IntegerList(vec![1])),
        );
    }

    #[test]
    fn value_kind_matches_data_type() {
        assert_eq!(Type::VersionIdList, <Vec<Version> as DataType>::TYPE);
        assert_eq!(Type::VersionIdList, Value::from(vec![Version::default()]).kind());
        assert_eq!(Type::Real, <f64 as DataType>::TYPE);
        assert_eq!(Type::Real, Value::from(1.0).kind());
    }

    #[test]
    fn serialize() {
        let inputs_and_expected = vec![
            (Value::Text(str!("x")), r#""x""#),
            (Value::Integer(5), "5"),
            (Value::VersionId(Version::new(1, 0, 0)), r#""1.0.0""#),
            (Value::IntegerList(vec![1, 2]), "[1,2]"),
        ];

        for (input, expected) in inputs_and_expected {
            assert_eq!(expected, serde_json::to_string(&input).unwrap());
        }
    }
}
