//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `IdeaRepository` - Whole-document writes of the Idea aggregate
//! - `IdeaReader` - Listing and search over ideas
//!
//! ## Collaborator Ports
//!
//! - `SessionValidator` - Bearer token validation
//! - `Clock` - Current time for the auto-delete sweeper
//! - `IdeaDocumentRenderer` - Export of an idea as a document

mod clock;
mod idea_document_renderer;
mod idea_reader;
mod idea_repository;
mod session_validator;

pub use clock::Clock;
pub use idea_document_renderer::{ExportError, IdeaDocumentRenderer, RenderedDocument};
pub use idea_reader::{
    IdeaList, IdeaListOptions, IdeaReader, IdeaSummary, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use idea_repository::IdeaRepository;
pub use session_validator::SessionValidator;
