//! # Student Registry Database Crate
//!
//! This crate is the persistence façade for student records. It hides the
//! SQL behind the `StudentStore` trait so the web layer only ever sees
//! list/create/find/update/delete.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the bundled schema, ensuring the `students` table exists.
//! - `StudentStore`: The operation set every storage backend implements.
//! - `DbRepository`: The PostgreSQL-backed store.
//! - `InMemoryRepository`: A process-local store for development and tests.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryRepository;
pub use repository::{DbRepository, StudentStore};
