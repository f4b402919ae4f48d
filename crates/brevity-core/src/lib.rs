pub mod length;
pub mod sanitize;
pub mod types;

pub use length::{resolve, LengthBounds, PolicyError};
pub use types::{SummaryLength, SummaryRequest, SummaryResult};
