//! Type-safe field artifacts for Rust structs.
//!
//! Deriving on a struct with named fields generates, next to the struct:
//!
//! - [`FieldNames`]: a unit struct with one `&'static str` constant per field.
//! - [`FieldEnum`](macro@FieldEnum): an enum with one variant per field.
//! - [`FieldVisitor`]: a visitor running one callback per field of a bound instance.
//! - [`FieldMapper`]: a transform that copies or rewrites every field into a target,
//!   or into a new value for structs marked `#[fieldgen(record)]`.
//!
//! ```
//! use fieldgen::{FieldEnum, FieldNameTable, FieldNames};
//!
//! #[derive(FieldNames, FieldEnum)]
//! struct Item {
//!     sku: String,
//!     quantity: u32,
//! }
//!
//! assert_eq!(ItemFieldNames::sku, "sku");
//! assert_eq!(ItemFieldNames::NAMES, &["sku", "quantity"]);
//! assert_eq!(ItemFields::QUANTITY.field_name(), "quantity");
//! ```

extern crate self as fieldgen;

mod errors;
mod fields;

pub use errors::FieldError;
pub use fields::{FieldEnum, FieldNameTable};

pub use fieldgen_macros::{FieldEnum, FieldMapper, FieldNames, FieldVisitor};
