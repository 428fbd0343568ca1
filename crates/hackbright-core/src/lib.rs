//! Core domain model for the Hackbright project tracker.
//!
//! This crate defines the student, project, and grade records, the SQLite
//! table layout, and the [`schema::Database`] store client that runs the
//! parameterized lookups and inserts.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use model::{GradeReport, Project, Student};
pub use schema::Database;
