//! Read-only domain records consumed by the engine.
//!
//! # Responsibility
//! - Define the task/project/label shapes supplied by the external store.
//! - Keep defaults for optional collections at construction time.
//!
//! # Invariants
//! - The engine never mutates these records.
//! - Cross-entity references may dangle and must be tolerated.

pub mod catalog;
pub mod task;
