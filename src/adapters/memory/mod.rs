//! In-memory adapters for tests and local development.

mod idea_store;

pub use idea_store::InMemoryIdeaStore;
