//! Domain Layer
//!
//! Contains entities, storage lifecycle hooks, and repository traits.

pub mod entities;
pub mod lifecycle;
pub mod repository;

// Re-exports
pub use entities::{Article, ArticleFilter, Scope, Tag, TagFilter};
pub use lifecycle::{Entity, Hooked, Statement, TableWriter, Write};
pub use repository::{ArticleRepository, TagRepository};
