use crate::excludes::ExcludeFilter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("unable to complete walking file tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Stream every candidate `.go` file under the module root into the worker
/// channel. Directories matching an exclude rule are pruned without descent;
/// files are filtered by both the name and the relative-path rules. The
/// walker stops quietly when the receiving side hangs up.
pub fn walk(root: &Path, filter: &ExcludeFilter, files: &Sender<PathBuf>) -> Result<(), WalkError> {
    let entries = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !prune(root, filter, entry));

    for entry in entries {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".go") {
            continue;
        }
        if filter.matches_name(&name) || filter.matches_path(&relative(root, entry.path())) {
            continue;
        }
        if files.send(entry.path().to_path_buf()).is_err() {
            // the worker exited early; nothing left to produce for
            return Ok(());
        }
    }
    Ok(())
}

fn prune(root: &Path, filter: &ExcludeFilter, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.path() == root {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    filter.matches_name(&name) || filter.matches_path(&relative(root, entry.path()))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excludes;
    use crate::models::{Exclude, ExcludeMatchType};
    use std::collections::BTreeSet;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package x\n").unwrap();
    }

    fn collect(root: &Path, filter: &ExcludeFilter) -> BTreeSet<String> {
        let (tx, rx) = mpsc::channel();
        walk(root, filter, &tx).unwrap();
        drop(tx);
        rx.into_iter()
            .map(|p| relative(root, &p))
            .collect()
    }

    #[test]
    fn test_only_go_files_are_produced() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "README.md");
        touch(dir.path(), "pkg/util/util.go");

        let filter = excludes::build(&[]).unwrap();
        let found = collect(dir.path(), &filter);

        assert_eq!(
            found,
            BTreeSet::from(["main.go".to_string(), "pkg/util/util.go".to_string()])
        );
    }

    #[test]
    fn test_excluded_directory_is_pruned() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "vendor/dep/dep.go");

        let filter = excludes::build(&[Exclude {
            match_type: ExcludeMatchType::Name,
            reg_exp: "^vendor$".to_string(),
        }])
        .unwrap();
        let found = collect(dir.path(), &filter);

        assert_eq!(found, BTreeSet::from(["main.go".to_string()]));
    }

    #[test]
    fn test_excluded_path_filters_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "gen/types.go");

        let filter = excludes::build(&[Exclude {
            match_type: ExcludeMatchType::Path,
            reg_exp: "^gen/".to_string(),
        }])
        .unwrap();
        let found = collect(dir.path(), &filter);

        assert_eq!(found, BTreeSet::from(["main.go".to_string()]));
    }

    #[test]
    fn test_excluded_file_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "types_generated.go");

        let filter = excludes::build(&[Exclude {
            match_type: ExcludeMatchType::Name,
            reg_exp: "_generated\\.go$".to_string(),
        }])
        .unwrap();
        let found = collect(dir.path(), &filter);

        assert_eq!(found, BTreeSet::from(["main.go".to_string()]));
    }
}
