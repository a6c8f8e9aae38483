// Standalone function extraction
//
// Class members and class-field values belong to the class extractor; trait
// and interface members to the interface extractor. Everything else that is
// function-shaped lands here, including nested and anonymous functions.

use super::nodes::{
    assigned_name, declared_name, docstring, is_class_member, is_interface_member, member_parent,
    modifier_tokens, preceding_comment,
};
use super::symbols::{render_signature, FunctionSymbol, Visibility, ANONYMOUS};
use crate::classify::params::{extract_parameters, return_type};
use crate::classify::visibility::infer_visibility;
use crate::parser::{walk, NodeId, SyntaxTree, Visitor};
use crate::profile::{Construct, LanguageId, LanguageProfile};

struct FunctionCollector<'p> {
    profile: &'p LanguageProfile,
    found: Vec<FunctionSymbol>,
}

/// All standalone functions in the file, in document order
pub fn extract_functions(tree: &SyntaxTree, profile: &LanguageProfile) -> Vec<FunctionSymbol> {
    if !profile.supports(Construct::Function) {
        return Vec::new();
    }
    let mut collector = FunctionCollector {
        profile,
        found: Vec::new(),
    };
    walk(tree, &mut collector);
    collector.found
}

impl Visitor for FunctionCollector<'_> {
    fn enter(&mut self, tree: &SyntaxTree, node: NodeId) {
        let profile = self.profile;
        // keyword tokens such as `function` and `lambda` share their kind
        // with the construct they open
        if !tree.is_named(node) {
            return;
        }
        if !profile.is(Construct::Function, tree.kind(node)) || owned_elsewhere(tree, node, profile) {
            return;
        }
        self.found.push(build_function(tree, node, profile));
    }
}

fn owned_elsewhere(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> bool {
    if is_class_member(tree, node, profile) || is_interface_member(tree, node, profile) {
        return true;
    }

    // `handler = () => {}` inside a class body
    member_parent(tree, node, profile).is_some_and(|parent| {
        profile.is(Construct::Field, tree.kind(parent)) && is_class_member(tree, parent, profile)
    })
}

fn build_function(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> FunctionSymbol {
    let resolved = declared_name(tree, node, profile).or_else(|| assigned_name(tree, node, profile));
    let is_anonymous = resolved.is_none();
    let name = resolved.unwrap_or_else(|| ANONYMOUS.to_string());

    let modifiers = modifier_tokens(tree, node, profile);
    let is_async = modifiers.iter().any(|m| m == "async");
    let visibility = infer_visibility(tree, node, &name, profile);
    let parameters = extract_parameters(tree, node, profile);
    let return_type = return_type(tree, node, profile);

    let (is_exported, is_default) = if profile.supports(Construct::ExportWrapper) {
        match export_wrapper(tree, node, profile) {
            Some(wrapper) => (true, tree.has_child_kind(wrapper, "default")),
            None => (false, false),
        }
    } else {
        (visibility == Visibility::Public, false)
    };

    let description = preceding_comment(tree, node, profile)
        .or_else(|| {
            (profile.id == LanguageId::Python)
                .then(|| docstring(tree, node, profile))
                .flatten()
        })
        .unwrap_or_default();

    FunctionSymbol {
        signature: render_signature(&name, &parameters, &return_type, is_async),
        visibility,
        parameters,
        return_type,
        is_static: modifiers.iter().any(|m| m == "static"),
        is_async,
        is_anonymous,
        is_exported,
        is_default,
        description,
        line_start: tree.start_line(node),
        line_end: tree.end_line(node),
        name,
    }
}

/// Nearest enclosing export wrapper, stopping at function, class and call
/// boundaries so callbacks inside an exported value are not exported
fn export_wrapper(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile) -> Option<NodeId> {
    for ancestor in tree.ancestors(node) {
        let kind = tree.kind(ancestor);
        if profile.is(Construct::ExportWrapper, kind) {
            return Some(ancestor);
        }
        let boundary = profile.is(Construct::Function, kind)
            || profile.is(Construct::ClassDeclaration, kind)
            || profile.is(Construct::ClassBody, kind)
            || profile.is(Construct::Call, kind);
        if boundary {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Grammar, TreeSitterGrammar};
    use crate::profile::profile_for;

    fn functions(language: LanguageId, source: &str) -> Vec<FunctionSymbol> {
        let grammar = TreeSitterGrammar::for_language(language).unwrap();
        let tree = grammar.parse(source).unwrap();
        extract_functions(&tree, profile_for(language))
    }

    fn names(found: &[FunctionSymbol]) -> Vec<&str> {
        found.iter().map(|f| f.name.as_str()).collect()
    }

    fn find<'a>(found: &'a [FunctionSymbol], name: &str) -> &'a FunctionSymbol {
        found.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn test_javascript_functions() {
        let source = r#"
/** Adds two numbers. */
export function add(a, b) {
  return a + b;
}

// Doubles a value
const double = x => x * 2;

export default function () {}

async function _load() {}

class Widget {
  render() {}
  handler = () => {};
}
"#;
        let found = functions(LanguageId::JavaScript, source);
        assert_eq!(names(&found), vec!["add", "double", ANONYMOUS, "_load"]);

        let add = find(&found, "add");
        assert!(add.is_exported);
        assert!(!add.is_default);
        assert_eq!(add.description, "Adds two numbers.");
        assert_eq!(add.parameters.len(), 2);
        assert_eq!(add.signature, "add(a, b)");

        let double = find(&found, "double");
        assert!(!double.is_anonymous);
        assert!(!double.is_exported);
        assert_eq!(double.description, "Doubles a value");
        assert_eq!(double.parameters[0].name, "x");

        let default = find(&found, ANONYMOUS);
        assert!(default.is_anonymous);
        assert!(default.is_exported);
        assert!(default.is_default);

        let load = find(&found, "_load");
        assert!(load.is_async);
        assert_eq!(load.visibility, Visibility::Private);
    }

    #[test]
    fn test_keyword_tokens_are_not_functions() {
        let js = functions(
            LanguageId::JavaScript,
            "export function add(a, b) { return a + b; }\nconst double = x => x * 2;\n",
        );
        assert_eq!(names(&js), vec!["add", "double"]);
        assert_eq!(js[0].line_start, 1);
        assert_eq!(js[1].line_start, 2);

        let py = functions(LanguageId::Python, "def greet():\n    pass\n\nsquare = lambda n: n * n\n");
        assert_eq!(names(&py), vec!["greet", "square"]);
    }

    #[test]
    fn test_python_functions() {
        let source = r#"
def greet(name: str) -> str:
    """Say hello."""
    return f"hi {name}"

def _helper():
    pass

class Widget:
    def render(self):
        pass

square = lambda n: n * n
"#;
        let found = functions(LanguageId::Python, source);
        assert_eq!(names(&found), vec!["greet", "_helper", "square"]);
        assert!(found.iter().all(|f| !f.is_anonymous));

        let greet = find(&found, "greet");
        assert_eq!(greet.return_type, "str");
        assert_eq!(greet.parameters[0].type_name, "str");
        assert_eq!(greet.description, "Say hello.");
        assert!(greet.is_exported);

        let helper = find(&found, "_helper");
        assert_eq!(helper.visibility, Visibility::Private);
        assert!(!helper.is_exported);
        assert_eq!(helper.return_type, "none");

        let square = find(&found, "square");
        assert!(!square.is_anonymous);
        assert_eq!(square.parameters.len(), 1);
    }

    #[test]
    fn test_go_functions() {
        let source = r#"package main

// Serve starts the server.
func Serve(addr string) error {
	return nil
}

func (s *Server) handle() {}

func helper() {
	go func() {}()
}
"#;
        let found = functions(LanguageId::Go, source);
        assert_eq!(found.len(), 4);

        let serve = find(&found, "Serve");
        assert!(serve.is_exported);
        assert_eq!(serve.description, "Serve starts the server.");
        assert_eq!(serve.return_type, "error");
        assert_eq!(serve.parameters[0].type_name, "string");

        assert_eq!(find(&found, "handle").visibility, Visibility::Private);
        assert!(find(&found, ANONYMOUS).is_anonymous);
    }

    #[test]
    fn test_rust_functions_skip_trait_members() {
        let source = r#"
pub async fn fetch(url: &str) -> Result<String> {
    todo!()
}

fn local() {}

impl Client {
    pub fn send(&self) {}
}

trait Transport {
    fn open(&self) {}
}
"#;
        let found = functions(LanguageId::Rust, source);
        let names: Vec<&str> = found.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["fetch", "local", "send"]);

        let fetch = find(&found, "fetch");
        assert!(fetch.is_async);
        assert!(fetch.is_exported);
        assert_eq!(fetch.return_type, "Result<String>");
        assert_eq!(fetch.parameters[0].type_name, "&str");
        assert_eq!(find(&found, "local").visibility, Visibility::Private);
    }

    #[test]
    fn test_callback_inside_export_is_not_exported() {
        let source = "export const routes = register(() => {});\n";
        let found = functions(LanguageId::TypeScript, source);
        assert_eq!(found.len(), 1);
        assert!(found[0].is_anonymous);
        assert!(!found[0].is_exported);
    }
}
