// Import specifier extraction
//
// One flat specifier per import target, exactly as written. Resolution
// against project files happens later in analysis::imports.

use super::nodes::{non_empty, strip_quotes};
use super::symbols::ImportEdge;
use crate::parser::{walk, NodeId, SyntaxTree, TreeWalker, Visitor, WalkEvent};
use crate::profile::{Construct, ImportStyle, LanguageId, LanguageProfile};

/// Leading keywords dropped from qualified import text
const QUALIFIED_KEYWORDS: &[&str] = &["import", "use", "using", "static", "global", "pub"];

/// Callee names that load a module at runtime
const LOADER_CALLS: &[&str] = &["require", "import"];

struct ImportCollector<'p> {
    profile: &'p LanguageProfile,
    edges: Vec<ImportEdge>,
}

/// Import specifiers in document order
pub fn extract_imports(tree: &SyntaxTree, profile: &LanguageProfile) -> Vec<ImportEdge> {
    if profile.import_style == ImportStyle::None {
        return Vec::new();
    }
    let mut collector = ImportCollector {
        profile,
        edges: Vec::new(),
    };
    walk(tree, &mut collector);
    collector.edges
}

impl Visitor for ImportCollector<'_> {
    fn enter(&mut self, tree: &SyntaxTree, node: NodeId) {
        if !tree.is_named(node) {
            return;
        }
        let profile = self.profile;
        let kind = tree.kind(node);

        let specifiers = if profile.is(Construct::Import, kind) {
            match profile.import_style {
                ImportStyle::StringLiteral => string_source(tree, node, profile).into_iter().collect(),
                ImportStyle::PythonModule => python_modules(tree, node),
                ImportStyle::QualifiedPath => qualified_path(tree, node).into_iter().collect(),
                ImportStyle::Include => include_path(tree, node).into_iter().collect(),
                ImportStyle::None => Vec::new(),
            }
        } else if is_script(profile) && profile.is(Construct::ExportWrapper, kind) {
            // `export { x } from "./y"`
            tree.child_by_field(node, "source")
                .and_then(|s| non_empty(&strip_quotes(tree.text(s))))
                .into_iter()
                .collect()
        } else if is_script(profile) && profile.is(Construct::Call, kind) {
            loader_call(tree, node, profile).into_iter().collect()
        } else {
            Vec::new()
        };

        let line = tree.start_line(node);
        self.edges
            .extend(specifiers.into_iter().map(|specifier| ImportEdge { specifier, line }));
    }
}

fn is_script(profile: &LanguageProfile) -> bool {
    matches!(profile.id, LanguageId::JavaScript | LanguageId::TypeScript)
}

fn string_source(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let literal = tree
        .child_by_field(node, "source")
        .or_else(|| tree.child_by_field(node, "path"))
        .or_else(|| first_descendant(tree, node, profile.kinds(Construct::StringLiteral)))?;
    non_empty(&strip_quotes(tree.text(literal)))
}

/// `require("x")` and dynamic `import("x")`
fn loader_call(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let callee = tree.child_by_field(node, "function")?;
    if !LOADER_CALLS.contains(&tree.text(callee).trim()) {
        return None;
    }
    let args = tree.child_by_field(node, "arguments")?;
    let first = tree.named_children(args).next()?;
    if !profile.is(Construct::StringLiteral, tree.kind(first)) {
        return None;
    }
    non_empty(&strip_quotes(tree.text(first)))
}

fn python_modules(tree: &SyntaxTree, node: NodeId) -> Vec<String> {
    // `from .models import User` -> `.models`
    if let Some(module) = tree.child_by_field(node, "module_name") {
        return non_empty(tree.text(module)).into_iter().collect();
    }

    // `import os, app.models as m` -> `os`, `app.models`
    tree.children_by_field(node, "name")
        .filter_map(|n| {
            let target = tree.child_by_field(n, "name").unwrap_or(n);
            non_empty(tree.text(target))
        })
        .collect()
}

fn qualified_path(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    if let Some(argument) = tree.child_by_field(node, "argument") {
        return non_empty(&collapse(tree.text(argument)));
    }

    let text = collapse(tree.text(node));
    let mut rest = text.trim().trim_end_matches(';').trim();
    loop {
        let Some((word, tail)) = rest.split_once(' ') else {
            break;
        };
        if QUALIFIED_KEYWORDS.contains(&word) || word.starts_with("pub(") {
            rest = tail.trim_start();
        } else {
            break;
        }
    }

    // `using Json = Newtonsoft.Json;`
    if let Some((_, target)) = rest.split_once('=') {
        rest = target.trim();
    }
    non_empty(rest)
}

fn include_path(tree: &SyntaxTree, node: NodeId) -> Option<String> {
    let path = tree.child_by_field(node, "path")?;
    let text = tree.text(path).trim();
    if text.starts_with('<') {
        return non_empty(text);
    }
    non_empty(&strip_quotes(text))
}

fn first_descendant(tree: &SyntaxTree, node: NodeId, kinds: &[&str]) -> Option<NodeId> {
    TreeWalker::new(tree, node).find_map(|event| match event {
        WalkEvent::Enter(id) if id != node && kinds.contains(&tree.kind(id)) => Some(id),
        _ => None,
    })
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Grammar, TreeSitterGrammar};
    use crate::profile::profile_for;

    fn specifiers(language: LanguageId, source: &str) -> Vec<String> {
        let grammar = TreeSitterGrammar::for_language(language).unwrap();
        let tree = grammar.parse(source).unwrap();
        extract_imports(&tree, profile_for(language))
            .into_iter()
            .map(|e| e.specifier)
            .collect()
    }

    #[test]
    fn test_typescript_imports() {
        let source = r#"
import { Injectable } from '@angular/core';
import type { User } from "./models/user";
import * as utils from '../utils';
export { helper } from './helper';
const fs = require('fs');
const lazy = () => import('./lazy');
"#;
        assert_eq!(
            specifiers(LanguageId::TypeScript, source),
            vec!["@angular/core", "./models/user", "../utils", "./helper", "fs", "./lazy"]
        );
    }

    #[test]
    fn test_import_lines() {
        let grammar = TreeSitterGrammar::for_language(LanguageId::JavaScript).unwrap();
        let tree = grammar.parse("\nimport a from './a';\n\nimport b from './b';\n").unwrap();
        let edges = extract_imports(&tree, profile_for(LanguageId::JavaScript));
        assert_eq!(edges[0].line, 2);
        assert_eq!(edges[1].line, 4);
    }

    #[test]
    fn test_python_imports() {
        let source = "import os, app.models as m\nfrom .services import UserService\nfrom .. import config\n";
        assert_eq!(
            specifiers(LanguageId::Python, source),
            vec!["os", "app.models", ".services", ".."]
        );
    }

    #[test]
    fn test_java_imports() {
        let source = "package a;\nimport com.acme.orders.OrderService;\nimport static java.util.Collections.sort;\nimport java.util.*;\n";
        assert_eq!(
            specifiers(LanguageId::Java, source),
            vec!["com.acme.orders.OrderService", "java.util.Collections.sort", "java.util.*"]
        );
    }

    #[test]
    fn test_rust_uses() {
        let source = "use crate::config::Config;\npub use std::{fs, io};\n";
        assert_eq!(
            specifiers(LanguageId::Rust, source),
            vec!["crate::config::Config", "std::{fs, io}"]
        );
    }

    #[test]
    fn test_c_includes() {
        let source = "#include <stdio.h>\n#include \"util/list.h\"\n";
        assert_eq!(specifiers(LanguageId::C, source), vec!["<stdio.h>", "util/list.h"]);
    }

    #[test]
    fn test_go_imports() {
        let source = "package main\n\nimport (\n\t\"fmt\"\n\tsrv \"example.com/app/server\"\n)\n";
        assert_eq!(
            specifiers(LanguageId::Go, source),
            vec!["fmt", "example.com/app/server"]
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let source = "import a from './a';\nimport b from './b';\n";
        let first = specifiers(LanguageId::JavaScript, source);
        let second = specifiers(LanguageId::JavaScript, source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_qualified_text_fallback() {
        let mut b = crate::parser::TreeBuilder::new("using Json = Newtonsoft.Json;", "compilation_unit");
        let root = b.root();
        let using = b.child(root, "using_directive", "using Json = Newtonsoft.Json;");
        let tree = b.finish();
        assert_eq!(qualified_path(&tree, using).as_deref(), Some("Newtonsoft.Json"));
    }
}
