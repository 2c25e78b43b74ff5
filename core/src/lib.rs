//! FinderMeister Export Core Library
//!
//! Contains the domain model, CSV encoding, source database adapters,
//! and export orchestration for the FinderMeister database backup job.

pub mod adapter;
pub mod csv;
pub mod domain;
pub mod error;
pub mod export;

pub use error::{ExportError, Result};
