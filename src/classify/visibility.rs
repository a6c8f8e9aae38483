// Visibility inference
//
// Exactly one strategy applies per language, chosen by its profile.

use crate::extract::nodes::{member_parent, modifier_tokens};
use crate::extract::Visibility;
use crate::parser::{NodeId, SyntaxTree};
use crate::profile::{Construct, LanguageProfile, VisibilityStyle};

/// Visibility of a declaration named `name`
pub fn infer_visibility(
    tree: &SyntaxTree,
    node: NodeId,
    name: &str,
    profile: &LanguageProfile,
) -> Visibility {
    match profile.visibility {
        VisibilityStyle::Underscore => from_underscore(name),
        VisibilityStyle::Capitalization => from_capitalization(name),
        VisibilityStyle::Modifiers { default } => explicit_modifier(tree, node, profile)
            .or_else(|| section_label(tree, node, profile))
            .or_else(|| name.starts_with('#').then_some(Visibility::Private))
            .unwrap_or(default),
    }
}

/// `_name` and `#name` are private; dunder names like `__init__` are not
pub fn from_underscore(name: &str) -> Visibility {
    let dunder = name.len() > 4 && name.starts_with("__") && name.ends_with("__");
    if !dunder && (name.starts_with('_') || name.starts_with('#')) {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

/// Go: exported names start with an upper-case letter
pub fn from_capitalization(name: &str) -> Visibility {
    match name.chars().next() {
        Some(c) if c.is_uppercase() => Visibility::Public,
        _ => Visibility::Private,
    }
}

/// Map a modifier keyword to a visibility
pub fn keyword_visibility(word: &str) -> Option<Visibility> {
    match word {
        "public" => Some(Visibility::Public),
        "private" => Some(Visibility::Private),
        "protected" => Some(Visibility::Protected),
        w if w == "pub" || w.starts_with("pub(") => Some(Visibility::Public),
        _ => None,
    }
}

fn explicit_modifier(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<Visibility> {
    modifier_tokens(tree, node, profile)
        .iter()
        .find_map(|t| keyword_visibility(t))
}

/// Nearest preceding `public:` style label inside the enclosing body
fn section_label(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<Visibility> {
    if !profile.supports(Construct::AccessSection) {
        return None;
    }
    let body = member_parent(tree, node, profile)?;
    let member = tree
        .children(body)
        .iter()
        .copied()
        .find(|c| *c == node || tree.ancestors(node).any(|a| a == *c))?;

    let mut current = tree.prev_sibling(member);
    while let Some(sibling) = current {
        if profile.is(Construct::AccessSection, tree.kind(sibling)) {
            let label = tree.text(sibling).trim().trim_end_matches(':').trim();
            if let Some(vis) = keyword_visibility(label) {
                return Some(vis);
            }
        }
        current = tree.prev_sibling(sibling);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TreeBuilder;
    use crate::profile::{profile_for, LanguageId};

    #[test]
    fn test_underscore_convention() {
        assert_eq!(from_underscore("greet"), Visibility::Public);
        assert_eq!(from_underscore("_log"), Visibility::Private);
        assert_eq!(from_underscore("__secret"), Visibility::Private);
        assert_eq!(from_underscore("__init__"), Visibility::Public);
        assert_eq!(from_underscore("#count"), Visibility::Private);
    }

    #[test]
    fn test_capitalization_convention() {
        assert_eq!(from_capitalization("Serve"), Visibility::Public);
        assert_eq!(from_capitalization("serve"), Visibility::Private);
        assert_eq!(from_capitalization(""), Visibility::Private);
    }

    #[test]
    fn test_keyword_visibility() {
        assert_eq!(keyword_visibility("protected"), Some(Visibility::Protected));
        assert_eq!(keyword_visibility("pub(crate)"), Some(Visibility::Public));
        assert_eq!(keyword_visibility("static"), None);
    }

    #[test]
    fn test_modifier_language_defaults_public() {
        let mut b = TreeBuilder::new("function _helper() {}", "program");
        let root = b.root();
        let func = b.child(root, "function_declaration", "function _helper() {}");
        b.field_child(func, "name", "identifier", "_helper");
        let tree = b.finish();

        let ts = profile_for(LanguageId::TypeScript);
        assert_eq!(infer_visibility(&tree, func, "_helper", ts), Visibility::Public);

        let js = profile_for(LanguageId::JavaScript);
        assert_eq!(infer_visibility(&tree, func, "_helper", js), Visibility::Private);
    }

    #[test]
    fn test_explicit_modifier_wins() {
        let source = "private save() {}";
        let mut b = TreeBuilder::new(source, "class_body");
        let root = b.root();
        let method = b.child(root, "method_definition", source);
        let modifier = b.child(method, "accessibility_modifier", "private");
        b.token(modifier, "private");
        b.field_child(method, "name", "property_identifier", "save");
        let tree = b.finish();

        let ts = profile_for(LanguageId::TypeScript);
        assert_eq!(infer_visibility(&tree, method, "save", ts), Visibility::Private);
    }

    #[test]
    fn test_access_section_label() {
        let source = "{ public: int a; private: int b; }";
        let mut b = TreeBuilder::new(source, "field_declaration_list");
        let body = b.root();
        b.child(body, "access_specifier", "public");
        b.token(body, ":");
        let a = b.child(body, "field_declaration", "int a;");
        b.child(body, "access_specifier", "private");
        b.token(body, ":");
        let field_b = b.child(body, "field_declaration", "int b;");
        let tree = b.finish();

        let cpp = profile_for(LanguageId::Cpp);
        assert_eq!(infer_visibility(&tree, a, "a", cpp), Visibility::Public);
        assert_eq!(infer_visibility(&tree, field_b, "b", cpp), Visibility::Private);
    }
}
