//! Gogroup Core Library
//!
//! This library reorganizes the import declarations of Go source files:
//! every imported path is classified into a user-defined bucket by pattern
//! match, buckets are ordered for display, entries within a bucket are
//! sorted, and the file is rewritten in place with bucket boundaries
//! separated by blank lines. Nothing outside the import block is touched.
//!
//! # Pipeline
//!
//! - Parse the file with tree-sitter-go and extract its import records
//! - Classify each record into a bucket (first match by `matchOrder` wins,
//!   unmatched records fall back to `other`)
//! - Rebuild the import block in `displayOrder` with each bucket sorted
//! - Repair pass: reinsert the blank line between adjacent buckets, which
//!   the structural rewrite cannot express
//! - Write back, skipping files another process modified in the meantime
//!
//! # Example
//!
//! ```no_run
//! use gogroup_core::{config, groups, Organizer};
//! use std::path::Path;
//! use std::sync::mpsc;
//!
//! let config = config::load(Path::new("gogroup.yaml")).unwrap();
//! let (matchers, display_order) = groups::build(&config.groups, "example.org/app").unwrap();
//!
//! let (tx, rx) = mpsc::channel();
//! tx.send("main.go".into()).unwrap();
//! drop(tx);
//!
//! let organizer = Organizer::new(matchers, display_order, false);
//! let summary = organizer.run(rx).unwrap();
//! println!("organized {} files", summary.written);
//! ```

pub mod config;
pub mod excludes;
pub mod groups;
pub mod models;
pub mod module;
pub mod organizer;
pub mod parser;
pub mod repair;
pub mod rewrite;
pub mod walker;

// Re-exports for convenience
pub use config::ConfigError;
pub use excludes::ExcludeFilter;
pub use models::*;
pub use organizer::{FileOutcome, Organizer, OrganizeError, RunSummary};
pub use parser::{ParseError, SyntaxError};
