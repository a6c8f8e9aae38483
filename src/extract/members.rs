// Member builders shared by the class and interface extractors

use super::nodes::{declared_name, name_text, non_empty};
use super::symbols::{render_signature, MethodSymbol, PropertySymbol, UNKNOWN_TYPE};
use crate::classify::params::{clean_type, extract_parameters, return_type};
use crate::classify::visibility::infer_visibility;
use crate::parser::{NodeId, SyntaxTree};
use crate::profile::{Construct, LanguageProfile};

/// Names every language uses for a constructor defined as a method
pub const CONSTRUCTOR_NAMES: &[&str] = &["constructor", "initialize", "__init__"];

/// Build a method record, or None when the node has no resolvable name
pub fn build_method(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<MethodSymbol> {
    let name = declared_name(tree, node, profile)?;
    let modifiers = super::nodes::modifier_tokens(tree, node, profile);
    let parameters = extract_parameters(tree, node, profile);
    let return_type = return_type(tree, node, profile);
    let is_async = modifiers.iter().any(|m| m == "async");
    let signature = render_signature(&name, &parameters, &return_type, is_async);

    Some(MethodSymbol {
        visibility: infer_visibility(tree, node, &name, profile),
        is_static: modifiers.iter().any(|m| m == "static"),
        is_async,
        parameters,
        return_type,
        signature,
        line_start: tree.start_line(node),
        line_end: tree.end_line(node),
        name,
    })
}

/// C-family member declarations like `void greet();` are field nodes whose
/// declarator is a function declarator
pub fn declares_function(tree: &SyntaxTree, node: NodeId) -> bool {
    tree.child_by_field(node, "declarator")
        .is_some_and(|d| tree.kind(d) == "function_declarator")
}

/// One property per declared name (`int a, b;` declares two)
pub fn build_properties(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<PropertySymbol> {
    let type_name = property_type(tree, node);
    let modifiers = super::nodes::modifier_tokens(tree, node, profile);
    let is_static = modifiers.iter().any(|m| m == "static");

    property_names(tree, node, profile)
        .into_iter()
        .map(|name| PropertySymbol {
            visibility: infer_visibility(tree, node, &name, profile),
            type_name: type_name.clone(),
            is_static,
            line: tree.start_line(node),
            name,
        })
        .collect()
}

/// Names declared by a field-like node
pub fn property_names(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<String> {
    let named: Vec<String> = tree
        .children_by_field(node, "name")
        .filter_map(|n| name_text(tree, n, profile))
        .collect();
    if !named.is_empty() {
        return named;
    }

    if let Some(property) = tree.child_by_field(node, "property") {
        return name_text(tree, property, profile).into_iter().collect();
    }

    if let Some(left) = tree.child_by_field(node, "left") {
        // `self.x = 1` and tuple targets are not class attributes
        if profile.is(Construct::Identifier, tree.kind(left)) {
            return non_empty(tree.text(left)).into_iter().collect();
        }
        return Vec::new();
    }

    let declarators: Vec<String> = tree
        .children_by_field(node, "declarator")
        .filter_map(|d| name_text(tree, d, profile))
        .collect();
    if !declarators.is_empty() {
        return declarators;
    }

    // C# nests declarators one level down (field -> variable_declaration)
    let nested: Vec<String> = tree
        .named_children(node)
        .flat_map(|c| tree.named_children(c).collect::<Vec<_>>())
        .filter(|g| profile.is(Construct::Assignment, tree.kind(*g)))
        .filter_map(|g| name_text(tree, g, profile))
        .collect();
    if !nested.is_empty() {
        return nested;
    }

    tree.named_children(node)
        .find(|c| profile.is(Construct::Identifier, tree.kind(*c)))
        .and_then(|c| non_empty(tree.text(c)))
        .into_iter()
        .collect()
}

/// Declared type of a field-like node, searched one level deep
pub fn property_type(tree: &SyntaxTree, node: NodeId) -> String {
    let typed = tree.child_by_field(node, "type").or_else(|| {
        tree.named_children(node)
            .find_map(|c| tree.child_by_field(c, "type"))
    });
    typed
        .map(|t| clean_type(tree.text(t)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}
