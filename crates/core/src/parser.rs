use crate::models::ImportRecord;
use std::ops::Range;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to initialize Go grammar: {0}")]
    Init(String),
    #[error("{}", render_syntax_errors(.0))]
    Syntax(Vec<SyntaxError>),
    #[error("unable to decode import path {0}")]
    ImportPath(String),
}

/// A single syntax error located in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

fn render_syntax_errors(errors: &[SyntaxError]) -> String {
    let details: Vec<String> = errors
        .iter()
        .map(|e| format!("{}:{}: {}", e.line, e.column, e.message))
        .collect();
    format!(
        "source contains {} syntax error(s): {}",
        errors.len(),
        details.join("; ")
    )
}

/// The file's import declarations, flattened
#[derive(Debug)]
pub struct ImportBlock {
    /// Every import spec across every import declaration, in source order
    pub records: Vec<ImportRecord>,
    /// Comments inside the block that are not attached to any one spec
    pub trailing_comments: Vec<String>,
    /// Byte range from the start of the first declaration to the end of the
    /// last; the rewriter replaces exactly this region
    pub span: Range<usize>,
    /// True when any declaration uses the parenthesized form
    pub parenthesized: bool,
}

/// A parsed Go source file. Owns the tree-sitter tree; callers only ever see
/// import records and the byte span of the import declarations, never raw
/// tree positions.
#[derive(Debug)]
pub struct GoSource<'s> {
    source: &'s str,
    tree: Tree,
}

impl<'s> GoSource<'s> {
    /// Parse Go source. Malformed input is rejected with every syntax error
    /// found, not just the first.
    pub fn parse(source: &'s str) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ParseError::Init(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Init("parser produced no tree".to_string()))?;

        if tree.root_node().has_error() {
            let mut errors = Vec::new();
            collect_syntax_errors(tree.root_node(), &mut errors);
            return Err(ParseError::Syntax(errors));
        }

        Ok(Self { source, tree })
    }

    /// Extract the flat list of import records together with the byte span
    /// they occupy. Returns `None` when the file declares no imports.
    pub fn import_block(&self) -> Result<Option<ImportBlock>, ParseError> {
        let root = self.tree.root_node();

        let mut decls = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if child.kind() == "import_declaration" {
                decls.push(child);
            }
        }
        let (Some(first), Some(last)) = (decls.first(), decls.last()) else {
            return Ok(None);
        };
        let span = first.start_byte()..last.end_byte();

        let mut records = Vec::new();
        let mut trailing_comments = Vec::new();
        let mut parenthesized = false;

        for decl in &decls {
            let mut cursor = decl.walk();
            for child in decl.children(&mut cursor) {
                match child.kind() {
                    "import_spec" => {
                        let mut none = Vec::new();
                        records.push(self.record_from_spec(&child, &mut none)?);
                    }
                    "import_spec_list" => {
                        parenthesized = true;
                        self.collect_specs(&child, &mut records, &mut trailing_comments)?;
                    }
                    _ => {}
                }
            }
        }

        // Top-level comments sitting between two import declarations would be
        // lost by the splice; carry them along as unattached block comments.
        if decls.len() > 1 {
            let mut cursor = root.walk();
            for child in root.named_children(&mut cursor) {
                if child.kind() == "comment"
                    && child.start_byte() > span.start
                    && child.end_byte() < span.end
                {
                    trailing_comments.push(self.text(&child));
                }
            }
        }

        Ok(Some(ImportBlock {
            records,
            trailing_comments,
            span,
            parenthesized,
        }))
    }

    /// Walk a parenthesized spec list, pairing comments with the specs they
    /// belong to: a comment on the same line as the previous spec trails it,
    /// anything else documents the next spec.
    fn collect_specs(
        &self,
        list: &Node,
        records: &mut Vec<ImportRecord>,
        trailing_comments: &mut Vec<String>,
    ) -> Result<(), ParseError> {
        let mut pending: Vec<String> = Vec::new();
        let mut last_spec_row: Option<usize> = None;

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "comment" => {
                    let text = self.text(&child);
                    if last_spec_row == Some(child.start_position().row) {
                        if let Some(last) = records.last_mut() {
                            last.line_comment = Some(text);
                        }
                    } else {
                        pending.push(text);
                    }
                }
                "import_spec" => {
                    last_spec_row = Some(child.end_position().row);
                    records.push(self.record_from_spec(&child, &mut pending)?);
                }
                _ => {}
            }
        }

        // comments between the final spec and the closing paren
        trailing_comments.append(&mut pending);
        Ok(())
    }

    fn record_from_spec(
        &self,
        spec: &Node,
        pending: &mut Vec<String>,
    ) -> Result<ImportRecord, ParseError> {
        let name = spec.child_by_field_name("name").map(|n| self.text(&n));
        let path_node = spec
            .child_by_field_name("path")
            .ok_or_else(|| ParseError::ImportPath(self.text(spec)))?;
        let quoted_path = self.text(&path_node);

        let path = unquote(&quoted_path)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ParseError::ImportPath(quoted_path.clone()))?;

        Ok(ImportRecord {
            quoted_path,
            path,
            name,
            doc_comments: std::mem::take(pending),
            line_comment: None,
        })
    }

    fn text(&self, node: &Node) -> String {
        self.source[node.byte_range()].to_string()
    }
}

fn collect_syntax_errors(node: Node, errors: &mut Vec<SyntaxError>) {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        let message = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "unexpected token".to_string()
        };
        errors.push(SyntaxError {
            line: pos.row + 1,
            column: pos.column + 1,
            message,
        });
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_syntax_errors(child, errors);
    }
}

/// Decode a Go string literal into the import path it denotes. Interpreted
/// strings support the escapes an import path could legally carry; raw
/// strings are taken verbatim.
fn unquote(quoted: &str) -> Option<String> {
    if quoted.len() >= 2 && quoted.starts_with('`') && quoted.ends_with('`') {
        return Some(quoted[1..quoted.len() - 1].to_string());
    }
    if quoted.len() < 2 || !quoted.starts_with('"') || !quoted.ends_with('"') {
        return None;
    }
    let inner = &quoted[1..quoted.len() - 1];
    if !inner.contains('\\') {
        return Some(inner.to_string());
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '/' => out.push('/'),
            _ => return None,
        }
    }
    Some(out)
}
