//! The closed set of attribute types.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Represents the type an attribute value is declared with.
///
/// The string forms are the names used in typed keys, e.g. `size:Long` or
/// `tags:List<String>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString)]
pub enum Type {
    #[strum(serialize = "String")]
    Text,
    #[strum(serialize = "Long")]
    Integer,
    #[strum(serialize = "Double")]
    Real,
    #[strum(serialize = "Version")]
    VersionId,
    #[strum(serialize = "List<String>")]
    TextList,
    #[strum(serialize = "List<Long>")]
    IntegerList,
    #[strum(serialize = "List<Double>")]
    RealList,
    #[strum(serialize = "List<Version>")]
    VersionIdList,
}

impl Type {
    /// Returns the element type of a list type, or `None` for scalars.
    pub fn sub(self) -> Option<Self> {
        match self {
            Self::TextList => Some(Self::Text),
            Self::IntegerList => Some(Self::Integer),
            Self::RealList => Some(Self::Real),
            Self::VersionIdList => Some(Self::VersionId),
            Self::Text | Self::Integer | Self::Real | Self::VersionId => None,
        }
    }

    /// Returns the list type whose elements are of this type, or `None` if
    /// this is already a list type.
    pub fn plural(self) -> Option<Self> {
        match self {
            Self::Text => Some(Self::TextList),
            Self::Integer => Some(Self::IntegerList),
            Self::Real => Some(Self::RealList),
            Self::VersionId => Some(Self::VersionIdList),
            Self::TextList | Self::IntegerList | Self::RealList | Self::VersionIdList => None,
        }
    }

    pub fn is_list(self) -> bool {
        self.sub().is_some()
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::Text
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(|_| D::Error::custom(format!("unknown attribute type: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;

    use strum::IntoEnumIterator;

    #[test]
    fn from_str() {
        let inputs_and_expected = vec![
            ("String", Some(Type::Text)),
            ("Long", Some(Type::Integer)),
            ("Double", Some(Type::Real)),
            ("Version", Some(Type::VersionId)),
            ("List<String>", Some(Type::TextList)),
            ("List<Long>", Some(Type::IntegerList)),
            ("List<Double>", Some(Type::RealList)),
            ("List<Version>", Some(Type::VersionIdList)),
            ("string", None),
            ("Integer", None),
            ("List<List<String>>", None),
            ("", None),
        ];

        for (input, expected) in inputs_and_expected {
            let produced = Type::from_str(input).ok();
            assert_eq!(expected, produced);
        }
    }

    #[test]
    fn display_matches_parse() {
        for ty in Type::iter() {
            assert_eq!(Ok(ty), ty.to_string().parse::<Type>());
        }
    }

    #[test]
    fn sub_and_plural() {
        for ty in Type::iter() {
            match (ty.sub(), ty.plural()) {
                (Some(sub), None) => {
                    assert!(ty.is_list());
                    assert!(!sub.is_list());
                    assert_eq!(Some(ty), sub.plural());
                },
                (None, Some(plural)) => {
                    assert!(!ty.is_list());
                    assert_eq!(Some(ty), plural.sub());
                },
                other => panic!("type {} has sub/plural {:?}", ty, other),
            }
        }
    }

    #[test]
    fn serde() {
        let produced = serde_json::to_string(&Type::IntegerList).unwrap();
        assert_eq!(r#""List<Long>""#, produced);

        let produced: Type = serde_json::from_str(r#""Version""#).unwrap();
        assert_eq!(Type::VersionId, produced);

        assert!(serde_json::from_str::<Type>(r#""Boolean""#).is_err());
    }
}
