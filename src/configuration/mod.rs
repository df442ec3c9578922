//! Configuration structures for the Butent integration services, together with
//! the code needed to load and validate them.
//!
//! Your starting point should probably be [`Configuration::load_from_path`].
//!
//! # Internals
//! The entire configuration structure is based on the concept of
//! unvalidated ("unresolved") and validated configuration structures.
//!
//! The configuration file is first deserialized into the [`UnresolvedConfiguration`]
//! structure, which mirrors the file and keeps every optional value as an `Option`.
//! Its `resolve` method then recursively turns it (and its tables) into the
//! resolved versions, filling in defaults (e.g. the database collation) and
//! validating values (e.g. the cron schedule) along the way.
//!
//! Resolved structures are plain values: nothing is filled in lazily later on,
//! so e.g. [`DatabaseConfiguration::format_dsn`] always returns the same string.

#![allow(rustdoc::private_intra_doc_links)]

mod error;
mod structure;
mod traits;
mod utilities;

pub use error::ConfigurationError;
pub use structure::*;
pub use utilities::{CONFIGURATION_DIRECTORY_PLACEHOLDER, DEFAULT_CONFIGURATION_FILE_NAME};
