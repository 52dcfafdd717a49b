//! querynorm core library.
//!
//! Normalizes loosely-shaped query options (sort order, field projection, pagination bounds)
//! into the canonical mapping a document-database query engine consumes. See [`OptionsHash`].

pub mod config;
pub mod errors;
pub mod keys;
pub mod normalizers;
pub mod operators;
pub mod options;
pub mod value;

pub use config::NormalizerConfig;
pub use errors::*;
pub use keys::{CanonicalKey, ResolvedKey};
pub use normalizers::parse_sort_expression;
pub use operators::{Direction, FieldName, SortKey, asc, desc};
pub use options::{OptionsHash, Projection, SortSpec};
pub use value::{OptionMap, OptionValue};
