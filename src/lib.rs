//! Validly - Idea validation platform
//!
//! Founders post a problem/solution pair, then collect likes, poll votes and
//! threaded comments from the community. Each idea is one aggregate document
//! persisted whole.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
