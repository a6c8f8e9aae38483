//! Symbol extraction.
//!
//! Every extractor is one forward pass over a [`SyntaxTree`] driven by the
//! iterative walker and the file's [`LanguageProfile`]. Nothing here returns
//! an error: shapes an extractor does not recognise are skipped or filled
//! with a sentinel, so a half-broken file still yields what it can.

pub mod classes;
pub mod decorators;
pub mod functions;
pub mod imports;
pub mod interfaces;
pub mod members;
pub mod nodes;
pub mod symbols;

pub use symbols::{
    basename_of, render_signature, ClassSymbol, DecoratorSymbol, FunctionSymbol, ImportEdge,
    InterfaceProperty, InterfaceSymbol, MethodSymbol, Parameter, PropertySymbol, SymbolIndex,
    Visibility, ANONYMOUS, NO_RETURN, UNKNOWN_TYPE,
};

use crate::classify::{
    EntryPointDetector, HeuristicRoleClassifier, PatternEntryPointDetector, RoleClassifier,
};
use crate::parser::SyntaxTree;
use crate::profile::LanguageProfile;
use std::path::Path;
use tracing::debug;

/// Runs every extractor and both classifiers for one file
pub struct SymbolExtractor {
    profile: &'static LanguageProfile,
    roles: Box<dyn RoleClassifier>,
    entry: Box<dyn EntryPointDetector>,
}

impl SymbolExtractor {
    /// Extractor with the heuristic classifiers
    pub fn new(profile: &'static LanguageProfile) -> Self {
        Self::with_classifiers(
            profile,
            Box::new(HeuristicRoleClassifier),
            Box::new(PatternEntryPointDetector),
        )
    }

    pub fn with_classifiers(
        profile: &'static LanguageProfile,
        roles: Box<dyn RoleClassifier>,
        entry: Box<dyn EntryPointDetector>,
    ) -> Self {
        Self { profile, roles, entry }
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    /// Build the complete index for one parsed file
    pub fn extract(&self, path: &Path, tree: &SyntaxTree) -> SymbolIndex {
        let profile = self.profile;
        let mut index = SymbolIndex::empty(path, profile.id);

        index.classes = classes::extract_classes(tree, profile);
        index.interfaces = interfaces::extract_interfaces(tree, profile);
        index.functions = functions::extract_functions(tree, profile);
        index.imports = imports::extract_imports(tree, profile);
        index.decorators = decorators::extract_decorators(tree, profile);
        index.line_count = tree.source().lines().count();

        index.roles = self.roles.classify(path, &index.decorators);
        index.entry = self.entry.detect(tree.source(), profile.id);

        debug!(
            path = %path.display(),
            classes = index.classes.len(),
            interfaces = index.interfaces.len(),
            functions = index.functions.len(),
            imports = index.imports.len(),
            "extracted symbols"
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{EntryPointInfo, FileRoles, FileType};
    use crate::parser::{Grammar, TreeSitterGrammar};
    use crate::profile::{profile_for, LanguageId};

    fn parse(language: LanguageId, source: &str) -> SyntaxTree {
        TreeSitterGrammar::for_language(language)
            .unwrap()
            .parse(source)
            .unwrap()
    }

    #[test]
    fn test_extract_full_index() {
        let source = r#"#!/usr/bin/env python3
import argparse
from .greeter import Greeter

class Greeter:
    def greet(self, name):
        return name

    def _log(self, msg):
        pass

def main():
    parser = argparse.ArgumentParser()
    parser.parse_args()

if __name__ == "__main__":
    main()
"#;
        let tree = parse(LanguageId::Python, source);
        let extractor = SymbolExtractor::new(profile_for(LanguageId::Python));
        let index = extractor.extract(Path::new("tools/cli.py"), &tree);

        assert_eq!(index.language, LanguageId::Python);
        assert_eq!(index.classes.len(), 1);
        assert_eq!(index.functions.len(), 1);
        assert_eq!(index.imports.len(), 2);
        assert_eq!(index.line_count, 17);
        assert!(index.entry.is_entry_point);
        assert!(index.entry.has_shebang);

        let greeter = index.class("Greeter").unwrap();
        assert_eq!(greeter.method("greet").unwrap().visibility, Visibility::Public);
        assert_eq!(greeter.method("_log").unwrap().visibility, Visibility::Private);
    }

    #[test]
    fn test_decorators_feed_role_classifier() {
        let source = "@Injectable()\nexport class Api {}\n";
        let tree = parse(LanguageId::TypeScript, source);
        let extractor = SymbolExtractor::new(profile_for(LanguageId::TypeScript));
        let index = extractor.extract(Path::new("src/api.ts"), &tree);
        assert!(index.roles.is_service);
        assert_eq!(index.primary_type(), FileType::Service);
    }

    struct NoRoles;

    impl RoleClassifier for NoRoles {
        fn classify(&self, _path: &Path, _decorators: &[DecoratorSymbol]) -> FileRoles {
            FileRoles::default()
        }
    }

    struct AlwaysEntry;

    impl EntryPointDetector for AlwaysEntry {
        fn detect(&self, _source: &str, _language: LanguageId) -> EntryPointInfo {
            EntryPointInfo {
                is_entry_point: true,
                ..EntryPointInfo::default()
            }
        }
    }

    #[test]
    fn test_custom_classifiers() {
        let tree = parse(LanguageId::TypeScript, "export class A {}\n");
        let extractor = SymbolExtractor::with_classifiers(
            profile_for(LanguageId::TypeScript),
            Box::new(NoRoles),
            Box::new(AlwaysEntry),
        );
        let index = extractor.extract(Path::new("src/user.service.ts"), &tree);
        assert!(!index.roles.is_service);
        assert!(index.entry.is_entry_point);
        assert_eq!(index.classes.len(), 1);
    }
}
