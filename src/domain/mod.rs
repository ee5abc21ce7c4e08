//! Shared data model layer (structs only).
//!
//! Domain types are data-only: no filesystem/network side effects. Anything
//! that touches storage, the metadata API, or the terminal lives in
//! `services`.

pub mod models;
