// Shared node inspection helpers
//
// Every helper here degrades to None/empty on unexpected shapes. Extraction
// never fails because a grammar nested something differently than expected.

use crate::parser::{NodeId, SyntaxTree};
use crate::profile::{Construct, LanguageProfile};

/// Fields that point at a declarator wrapping the real name (C, C++, Java)
const DECLARATOR_FIELDS: &[&str] = &["name", "declarator"];

/// Fields an assignment-like node uses for its target
const TARGET_FIELDS: &[&str] = &["name", "left", "key", "pattern", "declarator"];

/// Bare modifier tokens recognised outside modifier containers
const MODIFIER_TOKENS: &[&str] = &[
    "public", "private", "protected", "static", "async", "abstract", "readonly", "pub",
];

/// Clause children that never name a supertype
const NON_TYPE_KINDS: &[&str] = &[
    "type_arguments",
    "type_parameters",
    "keyword_argument",
    "access_specifier",
    "comment",
    "line_comment",
    "block_comment",
    "lifetime",
];

/// Resolve a name-bearing node down to its identifier text.
///
/// Follows `name`/`declarator` fields (`int *(*f)(void)` nests several
/// declarators) and falls back to the last identifier child, which gives the
/// property of `this.handler` or the right-most segment of `a.b.c`.
pub fn name_text(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let mut current = node;
    for _ in 0..8 {
        if profile.is(Construct::Identifier, tree.kind(current)) {
            return non_empty(tree.text(current));
        }
        let next = DECLARATOR_FIELDS
            .iter()
            .find_map(|f| tree.child_by_field(current, f));
        match next {
            Some(n) => current = n,
            None => break,
        }
    }

    tree.named_children(current)
        .filter(|c| profile.is(Construct::Identifier, tree.kind(*c)))
        .last()
        .and_then(|c| non_empty(tree.text(c)))
}

/// The name a declaration gives itself.
///
/// Only `name`/`declarator` fields and unfielded identifier children count, so
/// an arrow function's lone parameter is never mistaken for its name.
pub fn declared_name(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    for field in DECLARATOR_FIELDS {
        if let Some(child) = tree.child_by_field(node, field) {
            if let Some(name) = name_text(tree, child, profile) {
                return Some(name);
            }
        }
    }

    tree.named_children(node)
        .find(|c| {
            profile.is(Construct::Identifier, tree.kind(*c))
                && matches!(tree.field(*c), None | Some("name"))
        })
        .and_then(|c| non_empty(tree.text(c)))
}

/// The name lent by an enclosing assignment (`const greet = () => {}`)
pub fn assigned_name(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let parent = skip_wrappers(tree, tree.parent(node)?, profile);
    if !profile.is(Construct::Assignment, tree.kind(parent)) {
        return None;
    }

    for field in TARGET_FIELDS {
        if let Some(target) = tree.child_by_field(parent, field) {
            if target == node {
                continue;
            }
            if let Some(name) = name_text(tree, target, profile) {
                return Some(name);
            }
        }
    }

    tree.named_children(parent)
        .find(|c| *c != node && profile.is(Construct::Identifier, tree.kind(*c)))
        .and_then(|c| non_empty(tree.text(c)))
}

/// Climb from `node` through transparent wrappers
pub fn skip_wrappers(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> NodeId {
    let mut current = node;
    while profile.is(Construct::Wrapper, tree.kind(current)) {
        match tree.parent(current) {
            Some(p) => current = p,
            None => break,
        }
    }
    current
}

/// The node a member hangs from once wrappers (`decorated_definition`) are
/// skipped
pub fn member_parent(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<NodeId> {
    tree.parent(node).map(|p| skip_wrappers(tree, p, profile))
}

/// Is this node a direct member of a class body?
pub fn is_class_member(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> bool {
    let Some(body) = member_parent(tree, node, profile) else {
        return false;
    };
    profile.is(Construct::ClassBody, tree.kind(body))
        && tree
            .parent(body)
            .is_some_and(|owner| profile.is(Construct::ClassDeclaration, tree.kind(owner)))
}

/// Is this node a direct member of an interface (or of its body)?
pub fn is_interface_member(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> bool {
    let Some(parent) = member_parent(tree, node, profile) else {
        return false;
    };
    if profile.is(Construct::Interface, tree.kind(parent)) {
        return true;
    }
    profile.is(Construct::InterfaceBody, tree.kind(parent))
        && tree
            .parent(parent)
            .is_some_and(|owner| profile.is(Construct::Interface, tree.kind(owner)))
}

/// Locate the body node of a class or interface declaration
pub fn body_of(
    tree: &SyntaxTree,
    node: NodeId,
    profile: &LanguageProfile,
    body: Construct,
) -> Option<NodeId> {
    if let Some(b) = tree.child_by_field(node, "body") {
        if profile.is(body, tree.kind(b)) {
            return Some(b);
        }
    }
    tree.child_of_kind(node, profile.kinds(body))
}

/// Clause nodes of the given construct among children and grandchildren,
/// never descending into `skip` (the body)
pub fn find_clauses(
    tree: &SyntaxTree,
    node: NodeId,
    profile: &LanguageProfile,
    clause: Construct,
    skip: Option<NodeId>,
) -> Vec<NodeId> {
    let kinds = profile.kinds(clause);
    if kinds.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for child in tree.named_children(node) {
        if Some(child) == skip {
            continue;
        }
        if kinds.contains(&tree.kind(child)) {
            found.push(child);
            continue;
        }
        for grandchild in tree.named_children(child) {
            if kinds.contains(&tree.kind(grandchild)) {
                found.push(grandchild);
            }
        }
    }
    found
}

/// Type names listed in an extends/implements clause, in source order
pub fn clause_type_names(tree: &SyntaxTree, clause: NodeId) -> Vec<String> {
    let mut names = Vec::new();
    collect_type_names(tree, clause, &mut names, 0);
    names
}

fn collect_type_names(tree: &SyntaxTree, node: NodeId, out: &mut Vec<String>, depth: usize) {
    for child in tree.named_children(node) {
        let kind = tree.kind(child);
        if NON_TYPE_KINDS.contains(&kind) {
            continue;
        }
        if kind.ends_with("_list") || kind.ends_with("_clause") {
            if depth < 3 {
                collect_type_names(tree, child, out, depth + 1);
            }
            continue;
        }
        let text = if matches!(kind, "generic_type" | "generic_name" | "template_type") {
            tree.named_children(child)
                .next()
                .map(|base| tree.text(base))
                .unwrap_or_else(|| tree.text(child))
        } else {
            tree.text(child)
        };
        if let Some(name) = non_empty(text) {
            out.push(name);
        }
    }
}

/// Modifier words attached to a declaration: tokens inside modifier
/// containers plus bare modifier tokens among the direct children
pub fn modifier_tokens(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Vec<String> {
    let mut tokens = Vec::new();
    for child in tree.children(node).iter().copied() {
        let kind = tree.kind(child);
        if profile.is(Construct::Modifier, kind) {
            let inner = tree.children(child);
            if inner.is_empty() {
                tokens.push(if tree.is_named(child) {
                    tree.text(child).trim().to_string()
                } else {
                    kind.to_string()
                });
            } else {
                for grandchild in inner.iter().copied() {
                    if tree.is_named(grandchild) {
                        tokens.push(tree.text(grandchild).trim().to_string());
                    } else {
                        tokens.push(tree.kind(grandchild).to_string());
                    }
                }
            }
        } else if !tree.is_named(child) && MODIFIER_TOKENS.contains(&kind) {
            tokens.push(kind.to_string());
        }
    }
    tokens
}

/// Strip surrounding quote characters from a literal
pub fn strip_quotes(text: &str) -> String {
    text.trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string()
}

/// Collapse a comment into a single line of prose, dropping `@tag` lines
pub fn clean_comment(text: &str) -> String {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut line = raw.trim();
        for prefix in ["/**", "/*!", "/*", "///", "//!", "//", "#"] {
            if let Some(rest) = line.strip_prefix(prefix) {
                line = rest;
                break;
            }
        }
        line = line.trim_end_matches("*/").trim();
        line = line.trim_start_matches('*').trim();
        if line.is_empty() || line.starts_with('@') {
            continue;
        }
        lines.push(line);
    }
    lines.join(" ")
}

/// Collapse a Python docstring literal into a single line
pub fn clean_docstring(text: &str) -> String {
    let trimmed = text.trim();
    let inner = ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find_map(|q| trimmed.strip_prefix(q).and_then(|s| s.strip_suffix(q)))
        .unwrap_or(trimmed);
    inner
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Comment block immediately above a declaration, cleaned
pub fn preceding_comment(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let anchor = statement_anchor(tree, node, profile);
    let mut expected_line = tree.start_line(anchor);
    let mut blocks = Vec::new();
    let mut current = tree.prev_sibling(anchor);

    while let Some(sibling) = current {
        if !profile.is(Construct::Comment, tree.kind(sibling)) {
            break;
        }
        let end = tree.end_line(sibling);
        if end + 1 < expected_line {
            break;
        }
        blocks.push(tree.text(sibling));
        expected_line = tree.start_line(sibling);
        current = tree.prev_sibling(sibling);
    }

    if blocks.is_empty() {
        return None;
    }
    blocks.reverse();
    non_empty(&clean_comment(&blocks.join("\n")))
}

/// Climb to the statement that owns a declaration, so a comment above
/// `export const f = () => {}` is found from the arrow function
fn statement_anchor(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> NodeId {
    let mut anchor = node;
    while let Some(parent) = tree.parent(anchor) {
        if tree.parent(parent).is_none() || profile.is(Construct::ClassBody, tree.kind(parent)) {
            break;
        }
        let kind = tree.kind(parent);
        let transparent = profile.is(Construct::Wrapper, kind)
            || profile.is(Construct::ExportWrapper, kind)
            || profile.is(Construct::Assignment, kind);
        if !transparent && tree.start_line(parent) != tree.start_line(anchor) {
            break;
        }
        if profile.is(Construct::Function, kind) || profile.is(Construct::ClassDeclaration, kind) {
            break;
        }
        anchor = parent;
    }
    anchor
}

/// Python docstring: first statement of the body when it is a bare string
pub fn docstring(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<String> {
    let body = tree.child_by_field(node, "body")?;
    let first = tree.named_children(body).next()?;
    if tree.kind(first) != "expression_statement" {
        return None;
    }
    let literal = tree.named_children(first).next()?;
    if !profile.is(Construct::StringLiteral, tree.kind(literal)) {
        return None;
    }
    non_empty(&clean_docstring(tree.text(literal)))
}

pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
