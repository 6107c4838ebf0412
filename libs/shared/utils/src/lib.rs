pub mod dates;
pub mod extractor;
pub mod html;
pub mod jwt;
pub mod search;
pub mod session;
pub mod state;
pub mod test_utils;

pub use state::AppState;
