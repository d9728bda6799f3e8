//! Structured filter queries: the typed filter model, the statement builder,
//! and the boolean query compiler.

pub mod compiler;
pub mod filter;
pub mod rank;
pub mod statement;

pub use compiler::compile;
pub use filter::{FieldConstraint, FieldValue, FilterEntry, FilterExpression};
pub use rank::{Rank, SortDirection};
pub use statement::{build_statement, convert_value};
