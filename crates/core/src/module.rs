use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModuleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no go.mod found in {0} or any parent directory")]
    NotFound(String),
    #[error("go.mod in {0} has no module directive")]
    MissingDirective(String),
}

/// Walk parent directories from `start` until a `go.mod` is found and return
/// the module path it declares together with the directory holding it.
pub fn find_module_root(start: &Path) -> Result<(String, PathBuf), ModuleError> {
    let mut dir = fs::canonicalize(start)?;
    if !dir.is_dir() {
        dir.pop();
    }

    loop {
        let candidate = dir.join("go.mod");
        if candidate.is_file() {
            let contents = fs::read_to_string(&candidate)?;
            let module = parse_module_directive(&contents)
                .ok_or_else(|| ModuleError::MissingDirective(dir.display().to_string()))?;
            return Ok((module, dir));
        }
        if !dir.pop() {
            return Err(ModuleError::NotFound(start.display().to_string()));
        }
    }
}

/// Extract the module path from the `module` directive of a go.mod file.
fn parse_module_directive(gomod: &str) -> Option<String> {
    for line in gomod.lines() {
        let line = line.trim();
        if line.starts_with("//") {
            continue;
        }
        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        let name = rest.trim().trim_matches('"');
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}
