// Decorator / annotation extraction

use super::nodes::{non_empty, strip_quotes};
use super::symbols::DecoratorSymbol;
use crate::parser::{walk, NodeId, SyntaxTree, Visitor};
use crate::profile::{Construct, LanguageId, LanguageProfile};
use std::collections::BTreeMap;

/// Languages whose decorators or annotations are extracted
pub const DECORATOR_LANGUAGES: &[LanguageId] = &[
    LanguageId::TypeScript,
    LanguageId::JavaScript,
    LanguageId::Python,
    LanguageId::Java,
    LanguageId::CSharp,
];

/// Property key for a lone positional string argument (`@Route("/x")`)
pub const POSITIONAL_KEY: &str = "value";

struct DecoratorCollector<'p> {
    profile: &'p LanguageProfile,
    found: Vec<DecoratorSymbol>,
}

/// Decorators in document order
pub fn extract_decorators(tree: &SyntaxTree, profile: &LanguageProfile) -> Vec<DecoratorSymbol> {
    if !DECORATOR_LANGUAGES.contains(&profile.id) {
        return Vec::new();
    }
    let mut collector = DecoratorCollector {
        profile,
        found: Vec::new(),
    };
    walk(tree, &mut collector);
    collector.found
}

impl Visitor for DecoratorCollector<'_> {
    fn enter(&mut self, tree: &SyntaxTree, node: NodeId) {
        if tree.is_named(node) && self.profile.is(Construct::Decorator, tree.kind(node)) {
            if let Some(decorator) = build_decorator(tree, node, self.profile) {
                self.found.push(decorator);
            }
        }
    }
}

fn build_decorator(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<DecoratorSymbol> {
    let (callee, args) = match tree.child_by_field(node, "name") {
        // Java and C# annotations name themselves
        Some(name) => {
            let args = tree
                .child_by_field(node, "arguments")
                .or_else(|| tree.child_of_kind(node, profile.kinds(Construct::ObjectLiteral)));
            (name, args)
        }
        None => {
            let first = tree.named_children(node).next()?;
            if profile.is(Construct::Call, tree.kind(first)) {
                let callee = tree.child_by_field(first, "function").unwrap_or(first);
                (callee, tree.child_by_field(first, "arguments"))
            } else {
                (first, None)
            }
        }
    };

    let name = non_empty(tree.text(callee).trim_start_matches('@'))?;
    let properties = args
        .map(|a| decorator_properties(tree, a, profile))
        .unwrap_or_default();

    Some(DecoratorSymbol {
        name,
        properties,
        line: tree.start_line(node),
    })
}

fn decorator_properties(tree: &SyntaxTree, args: NodeId, profile: &LanguageProfile) -> BTreeMap<String, String> {
    let first = tree.named_children(args).next();
    let object = if profile.is(Construct::ObjectLiteral, tree.kind(args)) {
        args
    } else {
        first
            .filter(|f| profile.is(Construct::ObjectLiteral, tree.kind(*f)))
            .unwrap_or(args)
    };

    let mut properties: BTreeMap<String, String> = tree
        .named_children(object)
        .filter_map(|entry| pair_entry(tree, entry, profile))
        .collect();

    if let Some(first) = first.filter(|f| profile.is(Construct::StringLiteral, tree.kind(*f))) {
        properties
            .entry(POSITIONAL_KEY.to_string())
            .or_insert_with(|| strip_quotes(tree.text(first)));
    }
    properties
}

/// `key: value`, `key = value` or `name=value` as a (key, value) pair
fn pair_entry(tree: &SyntaxTree, entry: NodeId, profile: &LanguageProfile) -> Option<(String, String)> {
    let key = tree
        .child_by_field(entry, "key")
        .or_else(|| tree.child_by_field(entry, "name"));
    let value = tree.child_by_field(entry, "value");

    let (key, value) = match (key, value) {
        (Some(k), Some(v)) => (k, v),
        _ if profile.is(Construct::Pair, tree.kind(entry)) => {
            let mut named = tree.named_children(entry);
            let k = named.next()?;
            (k, named.last()?)
        }
        _ => return None,
    };

    let key = non_empty(&strip_quotes(tree.text(key)))?;
    Some((key, render_value(tree, value, profile)))
}

fn render_value(tree: &SyntaxTree, value: NodeId, profile: &LanguageProfile) -> String {
    if profile.is(Construct::StringLiteral, tree.kind(value)) {
        strip_quotes(tree.text(value))
    } else {
        tree.text(value).split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
