//! The typed attribute map.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter::FusedIterator;

use indexmap::map::{Iter as InnerIter, Keys as InnerKeys};
use indexmap::IndexMap as InnerMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::convert::{decode, encode};
use crate::error::Error;
use crate::key::parse_typed_key;
use crate::quote::quote;
use crate::types::{DataType, Input, Scalar, Type, Value};

const VERSION_KEY: &str = "version";

/// A raw value together with the type it was declared with.
#[derive(Debug, Clone, PartialEq)]
struct Entry {
    raw: String,
    ty: Type,
}

impl Entry {
    fn text(raw: String) -> Self {
        Self { raw, ty: Type::Text }
    }
}

/// An ordered map of attribute names to raw string values, each carrying the
/// type its value is declared with.
///
/// Insertion order is kept and only matters for serialization. Equality is
/// structural and order-independent, see [`AttrMap::is_equal`].
#[derive(Debug, Clone, Default)]
pub struct AttrMap(InnerMap<String, Entry>);

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding a single attribute, see [`AttrMap::put`].
    pub fn create(key: &str, raw: impl Into<String>) -> Self {
        let mut attrs = Self::new();
        attrs.put(key, raw);
        attrs
    }

    /// Adds an attribute and returns the map, for chained construction.
    pub fn with(mut self, key: &str, raw: impl Into<String>) -> Self {
        self.put(key, raw);
        self
    }

    /// Creates a map by copying every given map into it, in order.
    /// Later maps win on shared keys.
    pub fn merged<'a, I>(maps: I) -> Self
    where
        I: IntoIterator<Item = &'a AttrMap>,
    {
        let mut attrs = Self::new();
        for other in maps {
            attrs.put_all(other);
        }
        attrs
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|e| e.raw.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY)
    }

    /// Returns the declared type of an attribute. Attributes that are missing
    /// or were never given a type are text.
    pub fn get_type(&self, key: &str) -> Type {
        self.0.get(key).map_or(Type::Text, |e| e.ty)
    }

    /// Stores a raw value.
    ///
    /// A key in typed key syntax (`name:Long`, `name:List<Version>`, ...) is
    /// stored under its bare name with the declared type. Any other key is
    /// stored verbatim and keeps the type it already had, or text if new.
    /// Returns the previous raw value.
    pub fn put(&mut self, key: &str, raw: impl Into<String>) -> Option<String> {
        let raw = raw.into();

        match parse_typed_key(key) {
            Some((name, ty)) => {
                trace!(key, name, %ty, "resolved typed key");
                self.0
                    .insert(name.to_string(), Entry { raw, ty })
                    .map(|prev| prev.raw)
            },
            None => {
                if key.contains(':') {
                    trace!(key, "key is not a typed key, storing verbatim");
                }

                match self.0.get_mut(key) {
                    Some(entry) => Some(std::mem::replace(&mut entry.raw, raw)),
                    None => {
                        self.0.insert(key.to_string(), Entry::text(raw));
                        None
                    },
                }
            },
        }
    }

    /// Stores a typed value under `key`, declaring the key with the value's
    /// type. Text values are stored through [`AttrMap::put`] with the key
    /// as given, so a typed key still applies and a plain key keeps its type.
    /// A null input removes the attribute.
    /// Returns the previous raw value.
    pub fn put_typed(&mut self, key: &str, value: impl Into<Input>) -> Option<String> {
        let value = value.into();

        if let Input::Scalar(Scalar::Text(raw)) = value {
            return self.put(key, raw);
        }

        match encode(&value) {
            Some((ty, raw)) => self.put(&format!("{}:{}", key, ty), raw),
            None => {
                let name = parse_typed_key(key).map_or(key, |(name, _)| name);
                self.remove(name)
            },
        }
    }

    pub fn put_all_typed<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Input>,
    {
        for (key, value) in values {
            self.put_typed(key.as_ref(), value);
        }
    }

    /// Copies every attribute of `other` into this map. Both raw value and
    /// declared type are taken from `other`, including text types.
    pub fn put_all(&mut self, other: &AttrMap) {
        for (key, entry) in other.0.iter() {
            self.0.insert(key.clone(), entry.clone());
        }
    }

    /// Stores every pair of an untyped string mapping through
    /// [`AttrMap::put`], so typed keys are still recognized.
    pub fn put_all_raw<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, raw) in pairs {
            self.put(key.as_ref(), raw);
        }
    }

    /// Copies the attributes of `other` whose keys are missing here, or all
    /// of them if `override_existing` is set. Value and type move together.
    pub fn merge_with(&mut self, other: &AttrMap, override_existing: bool) {
        for (key, entry) in other.0.iter() {
            if override_existing || !self.0.contains_key(key) {
                self.0.insert(key.clone(), entry.clone());
            } else {
                debug!(key = key.as_str(), "keeping existing attribute during merge");
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key).map(|e| e.raw)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// Decodes an attribute through its declared type.
    pub fn get_typed(&self, key: &str) -> Result<Option<Value>, Error> {
        self.0.get(key).map(|e| decode(e.ty, &e.raw)).transpose()
    }

    /// Decodes an attribute, failing if it is not declared with `expected`.
    pub fn get_checked(&self, expected: Type, key: &str) -> Result<Option<Value>, Error> {
        let entry = match self.0.get(key) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        if entry.ty != expected {
            return Err(Error::TypeMismatch {
                key: key.to_string(),
                expected,
                actual: entry.ty,
                raw: entry.raw.clone(),
            });
        }

        decode(entry.ty, &entry.raw).map(Some)
    }

    /// Decodes an attribute into a Rust type, failing if the attribute is
    /// not declared with that type's attribute type.
    ///
    /// ```
    /// use attrmap::AttrMap;
    ///
    /// let attrs = AttrMap::create("size:List<Long>", "1,2");
    /// assert_eq!(Some(vec![1, 2]), attrs.get_as::<Vec<i64>>("size").unwrap());
    /// assert!(attrs.get_as::<String>("size").is_err());
    /// ```
    pub fn get_as<T: DataType>(&self, key: &str) -> Result<Option<T>, Error> {
        let value = match self.get_checked(T::TYPE, key)? {
            Some(value) => value,
            None => return Ok(None),
        };

        // The declared type was checked above, so conversion only fails if
        // decoding produced a different variant.
        value.try_into().map(Some).map_err(|_| Error::TypeMismatch {
            key: key.to_string(),
            expected: T::TYPE,
            actual: self.get_type(key),
            raw: self.get_or(key, "").to_string(),
        })
    }

    /// Checks that both maps hold the same keys with the same raw values and
    /// declared types, regardless of insertion order.
    pub fn is_equal(&self, other: &AttrMap) -> bool {
        self.len() == other.len()
            && self.0.iter().all(|(key, entry)| other.0.get(key) == Some(entry))
    }

    /// Iterates over attribute names and raw values in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys(self.0.keys())
    }

    /// Writes the attributes as `name[:Type]=value` clauses joined by `;`,
    /// quoting each value. Text-typed names carry no type suffix.
    pub fn append(&self, buf: &mut String) {
        for (i, (key, entry)) in self.0.iter().enumerate() {
            if i > 0 {
                buf.push(';');
            }
            append_key(buf, key, entry.ty);
            buf.push('=');
            quote(buf, &entry.raw);
        }
    }
}

fn append_key(buf: &mut String, key: &str, ty: Type) {
    buf.push_str(key);
    if ty != Type::Text {
        buf.push(':');
        buf.push_str(ty.as_ref());
    }
}

impl Display for AttrMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut buf = String::new();
        self.append(&mut buf);
        f.write_str(&buf)
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for AttrMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all_raw(iter)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        attrs.put_all_raw(iter);
        attrs
    }
}

/// Serializes as a map from `name[:Type]` to raw value, in insertion order.
impl Serialize for AttrMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, entry) in self.0.iter() {
            let mut typed_key = String::with_capacity(key.len());
            append_key(&mut typed_key, key, entry.ty);
            map.serialize_entry(&typed_key, &entry.raw)?;
        }
        map.end()
    }
}

struct AttrMapVisitor;

impl<'de> Visitor<'de> for AttrMapVisitor {
    type Value = AttrMap;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a map of attribute names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut attrs = AttrMap::new();
        while let Some((key, raw)) = access.next_entry::<String, String>()? {
            attrs.put(&key, raw);
        }
        Ok(attrs)
    }
}

/// Deserializes from a map of strings, with every entry stored through
/// [`AttrMap::put`].
impl<'de> Deserialize<'de> for AttrMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttrMapVisitor)
    }
}

pub struct Iter<'a>(InnerIter<'a, String, Entry>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, e)| (k.as_str(), e.raw.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, e)| (k.as_str(), e.raw.as_str()))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> FusedIterator for Iter<'a> {}

pub struct Keys<'a>(InnerKeys<'a, String, Entry>);

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Keys<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(String::as_str)
    }
}

impl<'a> ExactSizeIterator for Keys<'a> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> FusedIterator for Keys<'a> {}
