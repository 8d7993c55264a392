//! # PQL — statements for the Ad Manager query language
//!
//! Build PQL query text from optional clauses and bind named parameters as
//! typed values the publisher API understands.
//!
//! ## Quick Example
//!
//! ```
//! use pql::prelude::*;
//!
//! let statement = StatementBuilder::new()
//!     .select(["id", "name"])
//!     .from("Line_Item")
//!     .where_("orderId = :orderId")
//!     .limit(500)
//!     .bind("orderId", 12345)?
//!     .to_statement()?;
//!
//! assert_eq!(
//!     statement.query,
//!     "SELECT id,name FROM Line_Item WHERE orderId = :orderId LIMIT 500"
//! );
//! assert_eq!(statement.values[0].value.type_tag(), TypeTag::Number);
//! # Ok::<(), pql::error::PqlError>(())
//! ```
//!
//! ## Value types
//!
//! | Native value                 | Wire type       |
//! |------------------------------|-----------------|
//! | string                       | `TextValue`     |
//! | bool                         | `BooleanValue`  |
//! | integer / float              | `NumberValue`   |
//! | `{ year, month, day }`       | `DateValue`     |
//! | date-time                    | `DateTimeValue` |
//! | array of one of the above    | `SetValue`      |

pub mod config;
pub mod error;
pub mod statement;
pub mod value;

pub mod prelude {
    pub use crate::config::PqlConfig;
    pub use crate::error::*;
    pub use crate::statement::{BoundParameter, SortOrder, Statement, StatementBuilder};
    pub use crate::value::{
        Coercer, DateTimeValue, DateValue, NativeValue, Payload, TypeTag, TypedValue, coerce,
    };
}

/// Coerce a value using the default namespace.
///
/// # Example
///
/// ```
/// use pql::value::TypeTag;
///
/// let value = pql::coerce("x").unwrap();
/// assert_eq!(value.type_tag(), TypeTag::Text);
/// ```
pub fn coerce(value: impl Into<value::NativeValue>) -> error::PqlResult<value::TypedValue> {
    value::coerce(value)
}
