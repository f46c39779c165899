//! Infrastructure Layer
//!
//! Database implementations, the in-memory store and the purge scheduler.

pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use memory::MemoryBlogRepository;
pub use postgres::PgBlogRepository;
