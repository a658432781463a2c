//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (JWT, mock)
//! - `clock` - System and fixed clocks
//! - `document` - Idea export renderers
//! - `http` - axum REST API
//! - `memory` - In-memory idea store for tests and local runs
//! - `postgres` - PostgreSQL idea store

pub mod auth;
pub mod clock;
pub mod document;
pub mod http;
pub mod memory;
pub mod postgres;

pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use clock::{FixedClock, SystemClock};
pub use document::MarkdownIdeaRenderer;
pub use memory::InMemoryIdeaStore;
pub use postgres::{PostgresIdeaReader, PostgresIdeaRepository};
