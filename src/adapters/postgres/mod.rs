//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresIdeaRepository` - Whole-document writes of the Idea aggregate
//! - `PostgresIdeaReader` - Newest-first listing and search

mod idea_reader;
mod idea_repository;

pub use idea_reader::PostgresIdeaReader;
pub use idea_repository::PostgresIdeaRepository;
