pub mod types;
pub mod classification;

pub use types::{ClientError, OncoscopicError};
pub use classification::{ErrorClassification, ErrorKind};
