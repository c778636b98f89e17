//! # vmgate-contracts
//!
//! Shared types and contracts for the vmgate admission engine.
//!
//! All crates in the workspace import from here. No business logic lives
//! in this crate — only data definitions and error types.

pub mod error;
pub mod identity;
pub mod machine;
pub mod request;
pub mod token;
pub mod verdict;
