// Interface / trait extraction

use super::members::{build_method, property_names, property_type};
use super::nodes::{assigned_name, body_of, clause_type_names, declared_name, find_clauses, non_empty};
use super::symbols::{InterfaceProperty, InterfaceSymbol};
use crate::parser::{walk, NodeId, SyntaxTree, Visitor};
use crate::profile::{Construct, LanguageId, LanguageProfile};

/// Languages whose interface-like declarations are extracted
pub const INTERFACE_LANGUAGES: &[LanguageId] = &[
    LanguageId::TypeScript,
    LanguageId::Java,
    LanguageId::CSharp,
    LanguageId::Go,
    LanguageId::Rust,
];

struct InterfaceCollector<'p> {
    profile: &'p LanguageProfile,
    found: Vec<InterfaceSymbol>,
}

/// All named interfaces in the file, in document order
pub fn extract_interfaces(tree: &SyntaxTree, profile: &LanguageProfile) -> Vec<InterfaceSymbol> {
    if !INTERFACE_LANGUAGES.contains(&profile.id) {
        return Vec::new();
    }
    let mut collector = InterfaceCollector {
        profile,
        found: Vec::new(),
    };
    walk(tree, &mut collector);
    collector.found
}

impl Visitor for InterfaceCollector<'_> {
    fn enter(&mut self, tree: &SyntaxTree, node: NodeId) {
        if tree.is_named(node) && self.profile.is(Construct::Interface, tree.kind(node)) {
            if let Some(interface) = build_interface(tree, node, self.profile) {
                self.found.push(interface);
            }
        }
    }
}

fn build_interface(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<InterfaceSymbol> {
    let name = declared_name(tree, node, profile).or_else(|| assigned_name(tree, node, profile))?;

    // Go lists method specs directly under interface_type
    let body = if profile.supports(Construct::InterfaceBody) {
        body_of(tree, node, profile, Construct::InterfaceBody)
    } else {
        Some(node)
    };

    let mut properties = Vec::new();
    let mut methods = Vec::new();
    if let Some(body) = body {
        for member in tree.named_children(body) {
            let kind = tree.kind(member);
            if profile.is(Construct::PropertySignature, kind) {
                properties.extend(signature_properties(tree, member, profile));
            } else if profile.is(Construct::MethodSignature, kind) {
                methods.extend(build_method(tree, member, profile));
            }
        }
    }

    let skip = if body == Some(node) { None } else { body };
    let extends = find_clauses(tree, node, profile, Construct::InterfaceExtends, skip)
        .into_iter()
        .flat_map(|c| clause_type_names(tree, c))
        .collect();

    Some(InterfaceSymbol {
        name,
        properties,
        methods,
        extends,
        type_parameters: type_parameters(tree, node, profile),
        line_start: tree.start_line(node),
        line_end: tree.end_line(node),
    })
}

fn signature_properties(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<InterfaceProperty> {
    let marked_optional = tree.has_child_kind(node, "?");
    let type_name = property_type(tree, node);

    property_names(tree, node, profile)
        .into_iter()
        .map(|raw| {
            let optional = marked_optional || raw.ends_with('?');
            InterfaceProperty {
                name: raw.trim_end_matches('?').to_string(),
                type_name: type_name.clone(),
                optional,
            }
        })
        .collect()
}

fn type_parameters(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<String> {
    let list = tree
        .child_by_field(node, "type_parameters")
        .or_else(|| tree.child_of_kind(node, profile.kinds(Construct::TypeParameters)));
    let Some(list) = list else {
        return Vec::new();
    };

    tree.named_children(list)
        .filter_map(|param| {
            declared_name(tree, param, profile).or_else(|| non_empty(tree.text(param)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Grammar, TreeSitterGrammar};
    use crate::profile::profile_for;

    fn interfaces(language: LanguageId, source: &str) -> Vec<InterfaceSymbol> {
        let grammar = TreeSitterGrammar::for_language(language).unwrap();
        let tree = grammar.parse(source).unwrap();
        extract_interfaces(&tree, profile_for(language))
    }

    #[test]
    fn test_typescript_interface() {
        let source = r#"
export interface Repository<T, K> extends Readable<T>, Disposable {
  name: string;
  ttl?: number;
  find(id: K): Promise<T>;
  save(item: T): void;
}
"#;
        let found = interfaces(LanguageId::TypeScript, source);
        assert_eq!(found.len(), 1);
        let repo = &found[0];
        assert_eq!(repo.name, "Repository");
        assert_eq!(repo.type_parameters, vec!["T", "K"]);
        assert_eq!(repo.extends, vec!["Readable", "Disposable"]);

        assert_eq!(repo.properties.len(), 2);
        assert_eq!(repo.properties[0].name, "name");
        assert_eq!(repo.properties[0].type_name, "string");
        assert!(!repo.properties[0].optional);
        assert_eq!(repo.properties[1].name, "ttl");
        assert!(repo.properties[1].optional);

        assert_eq!(repo.methods.len(), 2);
        assert_eq!(repo.methods[0].name, "find");
        assert_eq!(repo.methods[0].return_type, "Promise<T>");
        assert_eq!(repo.methods[0].parameters[0].type_name, "K");
    }

    #[test]
    fn test_java_interface() {
        let source = r#"
public interface Shape extends Comparable<Shape> {
    int SIDES = 0;
    double area();
    String describe(String prefix);
}
"#;
        let found = interfaces(LanguageId::Java, source);
        let shape = &found[0];
        assert_eq!(shape.name, "Shape");
        assert_eq!(shape.extends, vec!["Comparable"]);
        assert_eq!(shape.properties.len(), 1);
        assert_eq!(shape.properties[0].name, "SIDES");
        assert_eq!(shape.methods.len(), 2);
        assert_eq!(shape.methods[1].parameters[0].type_name, "String");
    }

    #[test]
    fn test_go_interface_named_from_type_spec() {
        let source = "package io\n\ntype Reader interface {\n\tRead(p []byte) (int, error)\n}\n";
        let found = interfaces(LanguageId::Go, source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Reader");
        assert_eq!(found[0].methods.len(), 1);
        assert_eq!(found[0].methods[0].name, "Read");
    }

    #[test]
    fn test_rust_trait() {
        let source = "pub trait Store: Send + Sync {\n    fn get(&self, key: &str) -> Option<String>;\n}\n";
        let found = interfaces(LanguageId::Rust, source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Store");
        assert_eq!(found[0].extends, vec!["Send", "Sync"]);
        assert_eq!(found[0].methods[0].return_type, "Option<String>");
    }

    #[test]
    fn test_language_outside_allow_list_yields_nothing() {
        // Python has no interfaces even if a table said otherwise
        let found = interfaces(LanguageId::Python, "class Proto:\n    pass\n");
        assert!(found.is_empty());
    }
}
