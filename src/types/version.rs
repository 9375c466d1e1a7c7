//! Dotted version identifiers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

// Numeric components are limited to the range of a signed 32-bit integer.
const MAX_COMPONENT_DIGITS: usize = 10;
const MAX_COMPONENT: u32 = i32::MAX as u32;

/// A `major[.minor[.micro[.qualifier]]]` version identifier.
///
/// Versions are totally ordered by their numeric components and then by
/// qualifier, where a missing qualifier sorts before any present one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: u32,
    micro: u32,
    qualifier: Option<String>,
}

impl Version {
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self { major, minor, micro, qualifier: None }
    }

    /// Attaches a qualifier, which must be non-empty and made of
    /// `[-_0-9A-Za-z]` characters.
    pub fn with_qualifier(mut self, qualifier: &str) -> Result<Self, Error> {
        if !is_valid_qualifier(qualifier) {
            let repr = format!("{}.{}", self, qualifier);
            return Err(Error::InvalidVersion(repr, "invalid qualifier"));
        }

        self.qualifier = Some(qualifier.to_string());
        Ok(self)
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn micro(&self) -> u32 {
        self.micro
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

fn is_valid_qualifier(qualifier: &str) -> bool {
    !qualifier.is_empty()
        && qualifier.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_component(component: &str, original: &str) -> Result<u32, Error> {
    if component.is_empty() {
        return Err(Error::InvalidVersion(original.to_string(), "empty numeric component"));
    }

    let is_number = component.bytes().all(|b| b.is_ascii_digit());
    if component.len() > MAX_COMPONENT_DIGITS || !is_number {
        let reason = "numeric component is not a number";
        return Err(Error::InvalidVersion(original.to_string(), reason));
    }

    match component.parse::<u32>() {
        Ok(n) if n <= MAX_COMPONENT => Ok(n),
        _ => Err(Error::InvalidVersion(original.to_string(), "numeric component out of range")),
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Parses a version, ignoring surrounding whitespace.
    /// A blank string is the lowest version, `0.0.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let mut parts = trimmed.splitn(4, '.');

        // `splitn` always yields at least one part.
        let major = parse_component(parts.next().unwrap_or_default(), s)?;
        let minor = parts.next().map(|p| parse_component(p, s)).transpose()?.unwrap_or(0);
        let micro = parts.next().map(|p| parse_component(p, s)).transpose()?.unwrap_or(0);

        let qualifier = match parts.next() {
            Some(q) if is_valid_qualifier(q) => Some(q.to_string()),
            Some(_) => return Err(Error::InvalidVersion(s.to_string(), "invalid qualifier")),
            None => None,
        };

        Ok(Self { major, minor, micro, qualifier })
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;

        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{}", qualifier)?;
        }

        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = String::deserialize(deserializer)?;
        repr.parse().map_err(D::Error::custom)
    }
}
