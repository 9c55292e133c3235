use crate::models::GroupMatcher;
use crate::parser::ParseError;
use crate::repair::{insert_group_breaks, normalize_import_block};
use crate::rewrite::rewrite_imports;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::SystemTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
}

/// What happened to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Final bytes written back
    Written,
    /// No imports to reorder; file untouched
    Unchanged,
    /// List-only mode: the file would change
    NeedsOrganizing,
    /// List-only mode: already canonical
    Clean,
    /// Modified on disk while being processed; skipped
    Conflicted,
}

/// Counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub written: usize,
    pub unsorted: usize,
    pub skipped: usize,
}

/// The single consuming worker: drains the path queue and runs the full
/// pipeline (parse, classify, rewrite, repair, write back) on each file in
/// turn. Matchers and display order are immutable for the whole run.
pub struct Organizer {
    matchers: Vec<GroupMatcher>,
    display_order: Vec<String>,
    list_only: bool,
}

impl Organizer {
    pub fn new(matchers: Vec<GroupMatcher>, display_order: Vec<String>, list_only: bool) -> Self {
        Self {
            matchers,
            display_order,
            list_only,
        }
    }

    /// Process paths until the sender hangs up. The first fatal error aborts
    /// the run, abandoning anything still queued; a write conflict only skips
    /// the affected file.
    pub fn run(&self, files: Receiver<PathBuf>) -> Result<RunSummary, OrganizeError> {
        let mut summary = RunSummary::default();
        for path in files {
            match self.organize_file(&path)? {
                FileOutcome::Written => summary.written += 1,
                FileOutcome::NeedsOrganizing => {
                    println!("{} is not sorted", path.display());
                    summary.unsorted += 1;
                }
                FileOutcome::Conflicted => summary.skipped += 1,
                FileOutcome::Unchanged | FileOutcome::Clean => {}
            }
            summary.processed += 1;
        }
        Ok(summary)
    }

    /// Run the pipeline for one file.
    pub fn organize_file(&self, path: &Path) -> Result<FileOutcome, OrganizeError> {
        let metadata = fs::metadata(path).map_err(|source| io_error(path, source))?;
        let modified = metadata
            .modified()
            .map_err(|source| io_error(path, source))?;
        let source = fs::read_to_string(path).map_err(|source| io_error(path, source))?;

        let rewritten = rewrite_imports(&source, &self.matchers, &self.display_order).map_err(
            |source| OrganizeError::Parse {
                path: path.to_path_buf(),
                source,
            },
        )?;
        let Some(rewritten) = rewritten else {
            debug!("{} has no imports to organize", path.display());
            return Ok(FileOutcome::Unchanged);
        };

        let repaired = insert_group_breaks(&rewritten.text, &rewritten.breaks);
        let formatted = normalize_import_block(&repaired);

        if self.list_only {
            return Ok(if formatted != source {
                FileOutcome::NeedsOrganizing
            } else {
                FileOutcome::Clean
            });
        }

        write_back(path, formatted.as_bytes(), modified, metadata.permissions())
    }
}

/// Optimistic conflict check followed by the actual write. The file is
/// re-stat'ed first: a modification timestamp that moved since `seen_modified`
/// means another process touched the file while we were working, and we
/// refuse to overwrite its changes.
pub fn write_back(
    path: &Path,
    bytes: &[u8],
    seen_modified: SystemTime,
    permissions: fs::Permissions,
) -> Result<FileOutcome, OrganizeError> {
    let metadata = fs::metadata(path).map_err(|source| io_error(path, source))?;
    let modified = metadata
        .modified()
        .map_err(|source| io_error(path, source))?;
    if modified != seen_modified {
        warn!(
            "{} was modified while organizing, cowardly refusing to overwrite",
            path.display()
        );
        return Ok(FileOutcome::Conflicted);
    }

    fs::write(path, bytes).map_err(|source| io_error(path, source))?;
    fs::set_permissions(path, permissions).map_err(|source| io_error(path, source))?;
    debug!("organized {}", path.display());
    Ok(FileOutcome::Written)
}

fn io_error(path: &Path, source: std::io::Error) -> OrganizeError {
    OrganizeError::Io {
        path: path.to_path_buf(),
        source,
    }
}
