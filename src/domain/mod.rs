//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `idea` - Idea aggregate with polls, reactions and the comment tree

pub mod foundation;
pub mod idea;
