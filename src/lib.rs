//! Typed key/value attribute maps for structured header clauses.
//!
//! An attribute clause has the form `name[:Type]=value`, where the optional
//! type is one of `String`, `Long`, `Double`, `Version`, or a `List<...>` of
//! one of those. [`AttrMap`] stores each value as its raw string along with
//! its declared type, and decodes it on demand.
//!
//! ```
//! use attrmap::{AttrMap, Type, Value};
//!
//! let mut attrs = AttrMap::new();
//! attrs.put("size:Long", "5");
//! attrs.put("tags:List<String>", r"x,y\,z");
//!
//! assert_eq!(Type::Integer, attrs.get_type("size"));
//! assert_eq!(Some(5), attrs.get_as::<i64>("size").unwrap());
//! assert_eq!(
//!     Some(Value::TextList(vec!["x".into(), "y,z".into()])),
//!     attrs.get_typed("tags").unwrap(),
//! );
//! assert_eq!(r#"size:Long=5;tags:List<String>="x,y\\,z""#, attrs.to_string());
//! ```

mod attr_map;
mod convert;
mod error;
mod key;
mod quote;
mod split;
pub mod types;

pub use crate::attr_map::{AttrMap, Iter, Keys};
pub use crate::convert::{decode, decode_named};
pub use crate::error::Error;
pub use crate::key::{directive_name, parse_typed_key};
pub use crate::quote::{quote, unquote};
pub use crate::split::split_list_attribute;
pub use crate::types::{DataType, Input, Scalar, Type, Value, Version};
