//! Textual second pass over the rewriter's output.
//!
//! The structural rewrite renders the import block contiguously because the
//! tree layer has no concept of inter-bucket spacing. This module reinserts
//! the blank line before the first entry of every bucket after the first,
//! then runs a canonicalizing pass that cleans up the whitespace artifacts
//! blank-line insertion can leave behind.

use regex::Regex;
use std::sync::LazyLock;

/// Matches an entry line inside a parenthesized import block: leading
/// whitespace, optional local alias, quoted path.
static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s+(?:[\w\.]+\s+)?"(.+)""#).expect("import line pattern compiles")
});

/// The only top-level keywords that can legally follow an import block;
/// seeing one of them at the start of a line unambiguously ends the block.
fn ends_import_block(line: &str) -> bool {
    line.starts_with("var")
        || line.starts_with("func")
        || line.starts_with("const")
        || line.starts_with("type")
}

/// Insert a blank line immediately before each line whose quoted path equals
/// the head of `breaks`, consuming the breaks strictly in order. Both the
/// rendered block and the break list share the same display-then-lexicographic
/// ordering, so the scan never looks ahead or backtracks.
pub fn insert_group_breaks(text: &str, breaks: &[String]) -> String {
    let mut out = String::with_capacity(text.len() + breaks.len());
    let mut pending = breaks;
    let mut in_imports = false;
    let mut done = false;

    for line in text.split_inclusive('\n') {
        if !in_imports && !done && line.starts_with("import") {
            in_imports = true;
        }
        if in_imports && ends_import_block(line) {
            done = true;
            in_imports = false;
        }
        if in_imports && !pending.is_empty() {
            if let Some(caps) = IMPORT_LINE.captures(line) {
                if &caps[1] == pending[0].as_str() {
                    out.push('\n');
                    pending = &pending[1..];
                }
            }
        }
        out.push_str(line);
    }
    out
}

/// Normalize whitespace inside the parenthesized import block: collapse runs
/// of blank lines to one and drop blank lines touching the block delimiters.
/// Idempotent on already-canonical input; lines outside the block pass
/// through untouched. A file holds at most one import block after the
/// rewrite, so the pass stops permanently once that block closes; later
/// lookalike lines (say, inside a raw-string literal) are never entered.
pub fn normalize_import_block(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_block = false;
    let mut done = false;
    let mut pending_blank = false;
    let mut seen_entry = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);

        if !in_block {
            out.push_str(line);
            if !done && content.starts_with("import") {
                if content == "import (" {
                    in_block = true;
                    pending_blank = false;
                    seen_entry = false;
                } else {
                    // single-line form; there is no block to normalize
                    done = true;
                }
            }
            continue;
        }

        if content.trim().is_empty() {
            pending_blank = true;
            continue;
        }
        if content.starts_with(')') {
            // blank lines before the closing paren are dropped
            out.push_str(line);
            in_block = false;
            done = true;
            continue;
        }
        if pending_blank && seen_entry {
            out.push('\n');
        }
        pending_blank = false;
        seen_entry = true;
        out.push_str(line);
    }
    out
}
