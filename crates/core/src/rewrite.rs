use crate::groups::classify;
use crate::models::{GroupMatcher, ImportRecord};
use crate::parser::{GoSource, ParseError};
use std::collections::HashMap;

/// Output of the structural rewrite: the full file with its import block
/// re-rendered contiguously, plus the break markers the repair pass consumes.
/// The text does not yet contain blank lines between buckets.
#[derive(Debug)]
pub struct Rewritten {
    pub text: String,
    /// Unquoted path of the first record of every bucket after the first in
    /// display order, in the order the buckets are emitted
    pub breaks: Vec<String>,
}

/// Rebuild the file's import block: classify every import into its bucket,
/// concatenate the buckets in display order with each bucket sorted by its
/// quoted path (stable), and splice the rendered block over the span the
/// original declarations occupied. Everything outside that span is copied
/// byte for byte.
///
/// Returns `None` when the file has no imports to reorder.
pub fn rewrite_imports(
    source: &str,
    matchers: &[GroupMatcher],
    display_order: &[String],
) -> Result<Option<Rewritten>, ParseError> {
    let parsed = GoSource::parse(source)?;
    let Some(block) = parsed.import_block()? else {
        return Ok(None);
    };
    if block.records.is_empty() {
        return Ok(None);
    }

    let mut buckets: HashMap<&str, Vec<&ImportRecord>> = HashMap::new();
    for record in &block.records {
        let bucket = classify(matchers, &record.path);
        buckets.entry(bucket).or_default().push(record);
    }

    let mut ordered: Vec<&ImportRecord> = Vec::with_capacity(block.records.len());
    let mut breaks = Vec::new();
    for bucket in display_order {
        let Some(mut records) = buckets.remove(bucket.as_str()) else {
            continue;
        };
        records.sort_by(|a, b| a.quoted_path.cmp(&b.quoted_path));
        if bucket != &display_order[0] {
            breaks.push(records[0].path.clone());
        }
        ordered.extend(records);
    }
    debug_assert!(buckets.is_empty(), "every bucket must appear in the display order");

    let use_parens = block.parenthesized || ordered.len() > 1;
    let rendered = render_block(&ordered, &block.trailing_comments, use_parens);

    let mut text = String::with_capacity(source.len() + rendered.len());
    text.push_str(&source[..block.span.start]);
    text.push_str(&rendered);
    text.push_str(&source[block.span.end..]);

    Ok(Some(Rewritten { text, breaks }))
}

/// Render the import block in canonical form: tab-indented specs, doc
/// comments above their spec, trailing comments on the spec's line. No blank
/// lines are emitted here; bucket separation is the repair pass's job.
fn render_block(records: &[&ImportRecord], trailing: &[String], parenthesized: bool) -> String {
    if !parenthesized && records.len() == 1 && trailing.is_empty() {
        let record = records[0];
        let mut out = String::new();
        for comment in &record.doc_comments {
            out.push_str(comment);
            out.push('\n');
        }
        out.push_str("import ");
        push_spec(&mut out, record);
        return out;
    }

    let mut out = String::from("import (\n");
    for record in records {
        for comment in &record.doc_comments {
            out.push('\t');
            out.push_str(comment);
            out.push('\n');
        }
        out.push('\t');
        push_spec(&mut out, record);
        out.push('\n');
    }
    for comment in trailing {
        out.push('\t');
        out.push_str(comment);
        out.push('\n');
    }
    out.push(')');
    out
}

fn push_spec(out: &mut String, record: &ImportRecord) {
    if let Some(name) = &record.name {
        out.push_str(name);
        out.push(' ');
    }
    out.push_str(&record.quoted_path);
    if let Some(comment) = &record.line_comment {
        out.push(' ');
        out.push_str(comment);
    }
}
