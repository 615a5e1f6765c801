//! Simulink C-API metadata mapping layer.
//!
//! This crate bridges the metadata emitted by Simulink's C-API code
//! generation (block signals, parameters, data types) into strongly-typed
//! Rust structures, and locates & validates generated model directories
//! on disk.
//!
//! The binary `capilink` demonstrates usage and prints the discovered
//! layout as JSON.

pub mod keys;
pub mod mapping;
pub mod metadata;
pub mod paths;
pub mod registry;
