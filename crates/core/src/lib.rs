//! Cep Clima Core - Shared domain types.
//!
//! This crate provides the domain types used by the `api` binary:
//! validated value objects, the persisted lookup entity, and the
//! weather report projection returned to clients.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! store access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - The `ZipCode` value object, provider tags, the CEP
//!   resolution result, the persisted lookup entity, and weather reports

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
