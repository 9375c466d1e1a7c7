mod kind;
mod value;
mod version;

pub use self::kind::Type;
pub use self::value::{CannotConvert, DataType, Input, Scalar, Value};
pub use self::version::Version;
