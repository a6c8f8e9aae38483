// Tree-sitter grammar plugins
//
// Each plugin owns the tree-sitter Language handles for one LanguageId and
// converts the resulting tree into a SyntaxTree. Parsers are created per call
// because tree_sitter::Parser is neither Sync nor cheap to share.

use super::tree::{NodeId, NodeSpec, Point, SyntaxTree};
use super::Grammar;
use crate::error::{Error, Result};
use crate::profile::LanguageId;
use std::path::Path;
use tree_sitter::{Language, Parser, Tree};

/// A grammar plugin backed by tree-sitter
pub struct TreeSitterGrammar {
    id: LanguageId,
    language: Language,
    /// Dialect used for `.tsx`/`.jsx` files where it differs
    jsx: Option<Language>,
}

impl TreeSitterGrammar {
    /// Bundled grammar for a language, if any
    pub fn for_language(id: LanguageId) -> Option<Self> {
        let (language, jsx) = match id {
            LanguageId::JavaScript => (tree_sitter_javascript::language(), None),
            LanguageId::TypeScript => (
                tree_sitter_typescript::language_typescript(),
                Some(tree_sitter_typescript::language_tsx()),
            ),
            LanguageId::Python => (tree_sitter_python::language(), None),
            LanguageId::Java => (tree_sitter_java::language(), None),
            LanguageId::Go => (tree_sitter_go::language(), None),
            LanguageId::Rust => (tree_sitter_rust::language(), None),
            LanguageId::C => (tree_sitter_c::language(), None),
            LanguageId::Cpp => (tree_sitter_cpp::language(), None),
            LanguageId::CSharp | LanguageId::Ruby | LanguageId::Unknown => return None,
        };
        Some(Self { id, language, jsx })
    }

    fn parse_with(&self, language: &Language, path: &Path, source: &str) -> Result<SyntaxTree> {
        let mut parser = Parser::new();
        parser.set_language(language).map_err(|e| {
            Error::parse(path, format!("failed to load {} grammar: {}", self.id, e))
        })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(path, "parser returned no tree"))?;

        Ok(convert(&tree, source))
    }
}

impl Grammar for TreeSitterGrammar {
    fn language(&self) -> LanguageId {
        self.id
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree> {
        self.parse_with(&self.language, Path::new("<memory>"), source)
    }

    fn parse_path(&self, path: &Path, source: &str) -> Result<SyntaxTree> {
        let is_jsx = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("tsx") | Some("jsx")
        );
        let language = match (&self.jsx, is_jsx) {
            (Some(jsx), true) => jsx,
            _ => &self.language,
        };
        self.parse_with(language, path, source)
    }
}

/// Copy a tree-sitter tree into the arena, cursor-driven and iterative
fn convert(tree: &Tree, source: &str) -> SyntaxTree {
    let mut out = SyntaxTree::with_source(source.to_string());
    let mut cursor = tree.walk();
    let mut parents: Vec<NodeId> = Vec::new();

    'nodes: loop {
        let node = cursor.node();
        let start = node.start_position();
        let end = node.end_position();
        let id = out.push(
            parents.last().copied(),
            NodeSpec {
                kind: node.kind(),
                field: cursor.field_name(),
                named: node.is_named(),
                byte_range: node.byte_range(),
                start: Point {
                    row: start.row,
                    column: start.column,
                },
                end: Point {
                    row: end.row,
                    column: end.column,
                },
            },
        );

        if cursor.goto_first_child() {
            parents.push(id);
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                continue 'nodes;
            }
            if !cursor.goto_parent() {
                break 'nodes;
            }
            parents.pop();
        }
    }

    out
}
