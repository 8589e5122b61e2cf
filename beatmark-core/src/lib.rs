//! Platform-independent logic for the beatmark annotation panel.
//!
//! Everything here builds and tests natively: the browser crate drives
//! [`view::update`] with DOM events and executes the returned effects, while
//! the CLI and HTTP client share the wire types and the CSV beat store.

pub mod api;
pub mod catalog;
pub mod csv;
pub mod feedback;
pub mod format;
pub mod generate;
pub mod store;
pub mod table;
pub mod view;

pub use table::BeatTable;
pub use view::{update, Effect, Event, ViewState};
