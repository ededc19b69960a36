//! The extraction → validation → classification → aggregation pipeline.
//!
//! A pure, synchronous transform: each stage consumes its input and
//! produces new records. No stage feeds back into an earlier one, and
//! nothing here is fatal to a batch; failures degrade to "record
//! omitted", with counts surfaced in `BatchSummary`.

pub mod aggregate;
pub mod classify;
pub mod parse;
pub mod processor;
pub mod validate;

pub use aggregate::*;
pub use classify::*;
pub use parse::*;
pub use processor::*;
pub use validate::*;
