//! Core types and contracts for cinesync
//!
//! This crate contains the domain types shared across all other crates:
//! movie snapshots, search counters, saved items, actors, and the generic
//! document shape exchanged with the remote store.

pub mod constants;
mod document;
mod env_config;
mod error;
mod identity;
mod movie;
mod saved;
mod search;

pub use document::*;
pub use env_config::*;
pub use error::*;
pub use identity::*;
pub use movie::*;
pub use saved::*;
pub use search::*;
