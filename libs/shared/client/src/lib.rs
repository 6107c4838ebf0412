pub mod backend;
pub mod error;

pub use backend::{ApiResponse, BackendClient};
pub use error::ClientError;
