//! Domain model for the managed note pair.
//!
//! # Responsibility
//! - Define canonical data structures used by core sync logic.
//! - Keep one fixed-shape note record instead of dynamic maps.
//!
//! # Invariants
//! - A note's first content line is its canonical title.
//! - At most one managed note exists per category.

pub mod note;
