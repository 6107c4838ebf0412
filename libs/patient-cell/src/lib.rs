pub mod models;
pub mod resource;
pub mod router;

pub use models::*;
pub use resource::PATIENTS;
pub use router::*;
