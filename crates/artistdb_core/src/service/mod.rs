//! Core sync use-cases.
//!
//! # Responsibility
//! - Orchestrate remote client calls into the sync flow:
//!   authenticate, locate/provision, reconcile.
//! - Keep CLI layers decoupled from client and filesystem details.

pub mod locator;
pub mod reconciler;
pub mod session;
pub mod sync;
