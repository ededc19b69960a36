pub mod enums;
pub mod observation;
pub mod range;
pub mod report;

pub use enums::*;
pub use observation::*;
pub use range::*;
pub use report::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
