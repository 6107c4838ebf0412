pub mod auth;
pub mod error;
pub mod html;
pub mod session;
