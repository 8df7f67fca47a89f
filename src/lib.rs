//! Transfer processing engine.
//!
//! Consumes financial transfer events from an ordered stream, validates them
//! against account state, augments each transfer with an incentive quoted by
//! an external collaborator, and atomically mutates both balances while
//! appending the transfer to an immutable record store. A small HTTP surface
//! exposes balance reads.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
