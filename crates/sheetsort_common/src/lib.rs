//! Shared types for sheetsort.
//!
//! Everything the daemon and the CLI client agree on lives here: the
//! category enumeration with its worksheet routing, the error taxonomy,
//! text normalization, and the HTTP wire types.

pub mod category;
pub mod classification;
pub mod error;
pub mod normalize;
pub mod rpc;

pub use category::Category;
pub use classification::ClassificationResult;
pub use error::{LlmError, ProcessError, StoreError};
pub use normalize::normalize;
pub use rpc::{ErrorBody, HealthResponse, ProcessRequest, ProcessResponse};
