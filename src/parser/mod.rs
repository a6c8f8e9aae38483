// Parsing layer: the grammar plugin contract, the arena syntax tree and the
// iterative walker used by every extractor.

pub mod tree;
mod treesitter;
pub mod walker;

pub use tree::{NodeId, Point, SyntaxNode, SyntaxTree, TreeBuilder};
pub use treesitter::TreeSitterGrammar;
pub use walker::{walk, walk_from, TreeWalker, Visitor, WalkEvent};

use crate::error::Result;
use crate::profile::LanguageId;
use std::path::Path;

/// A grammar plugin: turns source text into a SyntaxTree
pub trait Grammar: Send + Sync {
    fn language(&self) -> LanguageId;

    fn parse(&self, source: &str) -> Result<SyntaxTree>;

    /// Parse with the file path available, for grammars whose dialect
    /// depends on the extension
    fn parse_path(&self, _path: &Path, source: &str) -> Result<SyntaxTree> {
        self.parse(source)
    }
}

/// The bundled grammar plugin for a language
pub fn grammar_for(id: LanguageId) -> Option<Box<dyn Grammar>> {
    TreeSitterGrammar::for_language(id).map(|g| Box::new(g) as Box<dyn Grammar>)
}
