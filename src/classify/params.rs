// Parameter and return-type recovery
//
// Types are only ever read from annotation nodes adjacent to the name. Nothing
// is inferred from usage; anything unannotated gets the sentinel.

use crate::extract::nodes::{name_text, non_empty};
use crate::extract::{Parameter, NO_RETURN, UNKNOWN_TYPE};
use crate::parser::{NodeId, SyntaxTree};
use crate::profile::{Construct, LanguageProfile, TypePosition};

/// Fields under which a parameter keeps its name
const PARAM_NAME_FIELDS: &[&str] = &["name", "pattern", "declarator"];

/// Parameters of a function-like node, in order
pub fn extract_parameters(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<Parameter> {
    let Some(list) = parameter_list(tree, node, profile) else {
        return Vec::new();
    };

    // `x => x * 2` has a bare identifier instead of a list
    if profile.is(Construct::Identifier, tree.kind(list)) {
        return non_empty(tree.text(list))
            .map(Parameter::untyped)
            .into_iter()
            .collect();
    }

    tree.named_children(list)
        .filter(|p| !profile.is(Construct::Comment, tree.kind(*p)))
        .flat_map(|p| parameter_entries(tree, p, profile))
        .collect()
}

/// Locate the parameter list, following declarators for C-style functions
pub fn parameter_list(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<NodeId> {
    let mut current = node;
    for _ in 0..6 {
        if let Some(list) = tree
            .child_by_field(current, "parameters")
            .or_else(|| tree.child_by_field(current, "parameter"))
            .or_else(|| tree.child_of_kind(current, profile.kinds(Construct::Parameters)))
        {
            return Some(list);
        }
        current = tree.child_by_field(current, "declarator")?;
    }
    None
}

fn parameter_entries(tree: &SyntaxTree, param: NodeId, profile: &LanguageProfile) -> Vec<Parameter> {
    if profile.is(Construct::Identifier, tree.kind(param)) {
        return non_empty(tree.text(param))
            .map(Parameter::untyped)
            .into_iter()
            .collect();
    }

    let names = name_children(tree, param, profile);
    if names.is_empty() {
        // `self`, `*args`, destructuring patterns: keep the source text
        return non_empty(&collapse_whitespace(tree.text(param)))
            .map(Parameter::untyped)
            .into_iter()
            .collect();
    }

    let anchor = match profile.type_position {
        TypePosition::AfterName => names[names.len() - 1],
        TypePosition::BeforeName => names[0],
    };
    let sibling = match profile.type_position {
        TypePosition::AfterName => tree.next_named_sibling(anchor),
        TypePosition::BeforeName => tree.prev_named_sibling(anchor),
    };
    let type_name = sibling
        .filter(|s| profile.is(Construct::TypeAnnotation, tree.kind(*s)))
        .map(|s| clean_type(tree.text(s)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());

    names
        .into_iter()
        .filter_map(|n| name_text(tree, n, profile).or_else(|| non_empty(tree.text(n))))
        .map(|name| Parameter::new(name, type_name.clone()))
        .collect()
}

/// Direct children of a parameter node that carry its name(s)
fn name_children(tree: &SyntaxTree, param: NodeId, profile: &LanguageProfile) -> Vec<NodeId> {
    let fielded: Vec<NodeId> = tree
        .children(param)
        .iter()
        .copied()
        .filter(|c| tree.field(*c).is_some_and(|f| PARAM_NAME_FIELDS.contains(&f)))
        .collect();
    if !fielded.is_empty() {
        return fielded;
    }

    tree.named_children(param)
        .filter(|c| {
            let kind = tree.kind(*c);
            profile.is(Construct::Identifier, kind)
                && !profile.is(Construct::TypeAnnotation, kind)
                && tree.field(*c) != Some("type")
        })
        .collect()
}

/// Declared return type, or the `none` sentinel
pub fn return_type(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> String {
    profile
        .return_type_fields
        .iter()
        .find_map(|f| tree.child_by_field(node, f))
        .map(|t| clean_type(tree.text(t)))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_RETURN.to_string())
}

/// Strip annotation punctuation (`: string`, `-> i32`) and collapse spaces
pub fn clean_type(text: &str) -> String {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("->")
        .or_else(|| trimmed.strip_prefix(':'))
        .unwrap_or(trimmed);
    collapse_whitespace(stripped)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TreeBuilder;
    use crate::profile::{profile_for, LanguageId};

    #[test]
    fn test_clean_type() {
        assert_eq!(clean_type(": string"), "string");
        assert_eq!(clean_type("-> Result<(), Error>"), "Result<(), Error>");
        assert_eq!(clean_type("Map<String,\n   Integer>"), "Map<String, Integer>");
    }

    #[test]
    fn test_type_after_name() {
        let source = "(name: str, count)";
        let mut b = TreeBuilder::new(source, "parameters");
        let list = b.root();
        let typed = b.child(list, "typed_parameter", "name: str");
        b.child(typed, "identifier", "name");
        b.token(typed, ":");
        b.field_child(typed, "type", "type", "str");
        b.child(list, "identifier", "count");
        let tree = b.finish();

        let py = profile_for(LanguageId::Python);
        let params: Vec<Parameter> = tree
            .named_children(list)
            .flat_map(|p| parameter_entries(&tree, p, py))
            .collect();
        assert_eq!(params, vec![Parameter::new("name", "str"), Parameter::untyped("count")]);
    }

    #[test]
    fn test_non_annotation_sibling_is_unknown() {
        let source = "(x = 5)";
        let mut b = TreeBuilder::new(source, "parameters");
        let list = b.root();
        let param = b.child(list, "default_parameter", "x = 5");
        b.field_child(param, "name", "identifier", "x");
        b.field_child(param, "value", "integer", "5");
        let tree = b.finish();

        let py = profile_for(LanguageId::Python);
        assert_eq!(parameter_entries(&tree, param, py), vec![Parameter::untyped("x")]);
    }

    #[test]
    fn test_type_before_name() {
        let source = "(String name)";
        let mut b = TreeBuilder::new(source, "formal_parameters");
        let list = b.root();
        let param = b.child(list, "formal_parameter", "String name");
        b.field_child(param, "type", "type_identifier", "String");
        b.field_child(param, "name", "identifier", "name");
        let tree = b.finish();

        let java = profile_for(LanguageId::Java);
        assert_eq!(parameter_entries(&tree, param, java), vec![Parameter::new("name", "String")]);
    }

    #[test]
    fn test_shared_type_for_grouped_names() {
        let source = "(a, b int)";
        let mut b = TreeBuilder::new(source, "parameter_list");
        let list = b.root();
        let decl = b.child(list, "parameter_declaration", "a, b int");
        b.field_child(decl, "name", "identifier", "a");
        b.token(decl, ",");
        b.field_child(decl, "name", "identifier", "b");
        b.field_child(decl, "type", "type_identifier", "int");
        let tree = b.finish();

        let go = profile_for(LanguageId::Go);
        assert_eq!(
            parameter_entries(&tree, decl, go),
            vec![Parameter::new("a", "int"), Parameter::new("b", "int")]
        );
    }

    #[test]
    fn test_unnamed_parameter_keeps_text() {
        let source = "(&self)";
        let mut b = TreeBuilder::new(source, "parameters");
        let list = b.root();
        let param = b.child(list, "self_parameter", "&self");
        let tree = b.finish();

        let rust = profile_for(LanguageId::Rust);
        assert_eq!(parameter_entries(&tree, param, rust), vec![Parameter::untyped("&self")]);
    }

    #[test]
    fn test_missing_return_type_is_none() {
        let mut b = TreeBuilder::new("def f(): pass", "module");
        let root = b.root();
        let func = b.child(root, "function_definition", "def f(): pass");
        let tree = b.finish();
        assert_eq!(return_type(&tree, func, profile_for(LanguageId::Python)), NO_RETURN);
    }
}
