pub mod aggregate;
pub mod loader;
