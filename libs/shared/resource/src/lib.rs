//! One CRUD/list/search/form controller, instantiated per entity through a
//! [`ResourceConfig`].

pub mod config;
pub mod controller;
pub mod form;
pub mod handlers;
pub mod router;
pub mod views;

pub use config::{FieldKind, FormField, Notices, ResourceConfig, SearchMode, Stat};
pub use controller::{LookupOptions, ResourceController};
pub use form::FormData;
pub use router::resource_routes;
