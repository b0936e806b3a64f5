//! Service layer for cinesync
//!
//! Saved movies, search popularity and the auth gate in front of them. Every
//! component gets its store and identity resolver injected by the caller.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Components hold trait objects")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod auth_gate;
pub mod error;
mod popularity_tracker;
mod saved_registry;


pub use auth_gate::AuthGate;
pub use error::ServiceError;
pub use popularity_tracker::{SearchPopularityTracker, TrendingReport};
pub use saved_registry::{MigrationReport, RowFailure, SavedItemRegistry};
