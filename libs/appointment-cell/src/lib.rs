pub mod filter;
pub mod models;
pub mod resource;
pub mod router;

pub use filter::AppointmentFilter;
pub use models::*;
pub use resource::APPOINTMENTS;
pub use router::*;
