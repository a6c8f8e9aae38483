// Class / struct extraction
//
// A frame is opened when the walker enters a class node and closed when it
// leaves it, so members are attached to the innermost open class and nested
// classes never swallow each other's members.

use super::members::{build_method, build_properties, declares_function, CONSTRUCTOR_NAMES};
use super::nodes::{assigned_name, body_of, clause_type_names, declared_name, find_clauses, member_parent};
use super::symbols::ClassSymbol;
use crate::parser::{walk, NodeId, SyntaxTree, Visitor};
use crate::profile::{Construct, LanguageProfile};

struct Frame {
    node: NodeId,
    body: Option<NodeId>,
    /// None when the class has no resolvable name or no body; the frame is
    /// still kept so enter/leave stay balanced
    class: Option<ClassSymbol>,
}

struct ClassCollector<'p> {
    profile: &'p LanguageProfile,
    frames: Vec<Frame>,
    done: Vec<ClassSymbol>,
}

/// All named classes in the file, in document order
pub fn extract_classes(tree: &SyntaxTree, profile: &LanguageProfile) -> Vec<ClassSymbol> {
    if !profile.supports(Construct::ClassDeclaration) {
        return Vec::new();
    }

    let mut collector = ClassCollector {
        profile,
        frames: Vec::new(),
        done: Vec::new(),
    };
    walk(tree, &mut collector);

    let mut classes = collector.done;
    classes.sort_by_key(|c| c.line_start);
    classes
}

impl Visitor for ClassCollector<'_> {
    fn enter(&mut self, tree: &SyntaxTree, node: NodeId) {
        // the `class` keyword has the same kind as a JS class expression
        if !tree.is_named(node) {
            return;
        }
        let kind = tree.kind(node);
        if self.profile.is(Construct::ClassDeclaration, kind) {
            self.open(tree, node);
            return;
        }

        let is_member_kind = self.profile.is(Construct::Method, kind)
            || self.profile.is(Construct::Field, kind)
            || self.profile.is(Construct::Constructor, kind);
        if !is_member_kind {
            return;
        }

        let profile = self.profile;
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        if frame.body.is_none() || member_parent(tree, node, profile) != frame.body {
            return;
        }
        if let Some(class) = frame.class.as_mut() {
            attach_member(tree, node, profile, class);
        }
    }

    fn leave(&mut self, tree: &SyntaxTree, node: NodeId) {
        if self.frames.last().map(|f| f.node) != Some(node) {
            return;
        }
        if let Some(frame) = self.frames.pop() {
            if let Some(mut class) = frame.class {
                class.line_end = tree.end_line(node);
                self.done.push(class);
            }
        }
    }
}

impl ClassCollector<'_> {
    fn open(&mut self, tree: &SyntaxTree, node: NodeId) {
        let profile = self.profile;
        let body = body_of(tree, node, profile, Construct::ClassBody);
        let name = declared_name(tree, node, profile).or_else(|| assigned_name(tree, node, profile));

        // A body-less struct node is a type reference (`struct point p;`)
        let class = match (name, body) {
            (Some(name), Some(_)) => {
                let mut class = ClassSymbol::new(name, tree.start_line(node));
                let mut supertypes = find_clauses(tree, node, profile, Construct::Superclass, body)
                    .into_iter()
                    .flat_map(|c| clause_type_names(tree, c));
                class.extends = supertypes.next();
                class.implements.extend(supertypes);
                for clause in find_clauses(tree, node, profile, Construct::Implements, body) {
                    class.implements.extend(clause_type_names(tree, clause));
                }
                Some(class)
            }
            _ => None,
        };

        self.frames.push(Frame { node, body, class });
    }
}

fn attach_member(tree: &SyntaxTree, node: NodeId, profile: &LanguageProfile, class: &mut ClassSymbol) {
    let kind = tree.kind(node);

    if profile.is(Construct::Constructor, kind) {
        if let Some(ctor) = build_method(tree, node, profile) {
            class.constructor.get_or_insert(ctor);
        }
        return;
    }

    let is_method = profile.is(Construct::Method, kind)
        || (profile.is(Construct::Field, kind) && declares_function(tree, node));
    if is_method {
        if let Some(method) = build_method(tree, node, profile) {
            if CONSTRUCTOR_NAMES.contains(&method.name.as_str()) {
                class.constructor.get_or_insert(method);
            } else {
                class.methods.push(method);
            }
        }
        return;
    }

    class.properties.extend(build_properties(tree, node, profile));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Visibility;
    use crate::parser::{Grammar, TreeBuilder, TreeSitterGrammar};
    use crate::profile::{profile_for, LanguageId};

    fn classes(language: LanguageId, source: &str) -> Vec<ClassSymbol> {
        let grammar = TreeSitterGrammar::for_language(language).unwrap();
        let tree = grammar.parse(source).unwrap();
        extract_classes(&tree, profile_for(language))
    }

    #[test]
    fn test_python_greeter() {
        let source = r#"
class Greeter:
    greeting = "hello"

    def __init__(self, name):
        self.name = name

    def greet(self, name):
        return f"{self.greeting} {name}"

    def _log(self, msg):
        print(msg)
"#;
        let found = classes(LanguageId::Python, source);
        assert_eq!(found.len(), 1);
        let greeter = &found[0];
        assert_eq!(greeter.name, "Greeter");
        assert_eq!(greeter.methods.len(), 2);
        assert_eq!(greeter.method("greet").unwrap().visibility, Visibility::Public);
        assert_eq!(greeter.method("_log").unwrap().visibility, Visibility::Private);
        assert_eq!(greeter.constructor.as_ref().unwrap().name, "__init__");
        assert!(greeter.method("__init__").is_none());
        assert_eq!(greeter.properties.len(), 1);
        assert_eq!(greeter.properties[0].name, "greeting");
    }

    #[test]
    fn test_python_bases_and_decorated_methods() {
        let source = r#"
class Admin(User, AuditMixin, metaclass=Meta):
    @property
    def role(self):
        return "admin"

    @staticmethod
    def build():
        return Admin()
"#;
        let found = classes(LanguageId::Python, source);
        let admin = &found[0];
        assert_eq!(admin.extends.as_deref(), Some("User"));
        assert_eq!(admin.implements, vec!["AuditMixin"]);
        assert_eq!(admin.methods.len(), 2);
    }

    #[test]
    fn test_typescript_members() {
        let source = r#"
export class UserService extends BaseService implements OnInit, OnDestroy {
  private cache: Map<string, User> = new Map();
  static instances = 0;

  constructor(private http: HttpClient) {
    super();
  }

  async load(id: string): Promise<User> {
    return this.http.get(id);
  }

  protected reset(): void {}
}
"#;
        let found = classes(LanguageId::TypeScript, source);
        assert_eq!(found.len(), 1);
        let svc = &found[0];
        assert_eq!(svc.name, "UserService");
        assert_eq!(svc.extends.as_deref(), Some("BaseService"));
        assert_eq!(svc.implements, vec!["OnInit", "OnDestroy"]);
        assert_eq!(svc.methods.len(), 2);
        assert_eq!(svc.properties.len(), 2);

        let ctor = svc.constructor.as_ref().unwrap();
        assert_eq!(ctor.parameters[0].name, "http");
        assert_eq!(ctor.parameters[0].type_name, "HttpClient");

        let load = svc.method("load").unwrap();
        assert!(load.is_async);
        assert_eq!(load.return_type, "Promise<User>");
        assert_eq!(load.parameters[0].type_name, "string");
        assert_eq!(svc.method("reset").unwrap().visibility, Visibility::Protected);

        let cache = svc.property("cache").unwrap();
        assert_eq!(cache.visibility, Visibility::Private);
        assert_eq!(cache.type_name, "Map<string, User>");
        assert!(svc.property("instances").unwrap().is_static);
    }

    #[test]
    fn test_javascript_nested_classes_keep_their_members() {
        let source = r#"
class Outer {
  first() {}
  build() {
    return class Inner {
      innerOnly() {}
    };
  }
  last() {}
}
"#;
        let found = classes(LanguageId::JavaScript, source);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Outer");
        let outer_methods: Vec<&str> = found[0].methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(outer_methods, vec!["first", "build", "last"]);
        assert_eq!(found[1].name, "Inner");
        assert_eq!(found[1].methods.len(), 1);
    }

    #[test]
    fn test_java_class() {
        let source = r#"
public class OrderController extends BaseController implements Auditable {
    private final OrderService service;
    protected int a, b;

    public OrderController(OrderService service) {
        this.service = service;
    }

    public static List<Order> list(String status, int page) {
        return null;
    }
}
"#;
        let found = classes(LanguageId::Java, source);
        let ctrl = &found[0];
        assert_eq!(ctrl.name, "OrderController");
        assert_eq!(ctrl.extends.as_deref(), Some("BaseController"));
        assert_eq!(ctrl.implements, vec!["Auditable"]);
        assert_eq!(ctrl.constructor.as_ref().unwrap().name, "OrderController");
        assert_eq!(ctrl.methods.len(), 1);
        assert_eq!(ctrl.properties.len(), 3);

        let list = ctrl.method("list").unwrap();
        assert!(list.is_static);
        assert_eq!(list.return_type, "List<Order>");
        assert_eq!(list.parameters[0].type_name, "String");
        assert_eq!(list.parameters[1].type_name, "int");
        assert_eq!(ctrl.property("service").unwrap().visibility, Visibility::Private);
        assert_eq!(ctrl.property("b").unwrap().visibility, Visibility::Protected);
    }

    #[test]
    fn test_go_struct_named_from_type_spec() {
        let source = "package main\n\ntype Server struct {\n\tAddr string\n\tport int\n}\n";
        let found = classes(LanguageId::Go, source);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Server");
        assert_eq!(found[0].property("Addr").unwrap().visibility, Visibility::Public);
        assert_eq!(found[0].property("port").unwrap().visibility, Visibility::Private);
        assert_eq!(found[0].property("port").unwrap().type_name, "int");
    }

    #[test]
    fn test_unnamed_class_dropped() {
        let found = classes(LanguageId::JavaScript, "export default class { run() {} }\n");
        assert!(found.is_empty());
    }

    #[test]
    fn test_ruby_initialize_is_constructor() {
        // No bundled Ruby grammar: build the tree by hand
        let source = "class Greeter\n  def initialize(name)\n  end\n  def greet\n  end\nend\n";
        let mut b = TreeBuilder::new(source, "program");
        let root = b.root();
        let class = b.child(root, "class", source.trim_end());
        b.token(class, "class");
        b.field_child(class, "name", "constant", "Greeter");
        let body = b.child(class, "body_statement", "def initialize(name)\n  end\n  def greet\n  end");
        let init = b.child(body, "method", "def initialize(name)\n  end");
        b.field_child(init, "name", "identifier", "initialize");
        let params = b.field_child(init, "parameters", "method_parameters", "(name)");
        b.child(params, "identifier", "name");
        let greet = b.child(body, "method", "def greet\n  end");
        b.field_child(greet, "name", "identifier", "greet");
        let tree = b.finish();

        let found = extract_classes(&tree, profile_for(LanguageId::Ruby));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].constructor.as_ref().unwrap().name, "initialize");
        assert_eq!(found[0].constructor.as_ref().unwrap().parameters.len(), 1);
        assert_eq!(found[0].methods.len(), 1);
        assert_eq!(found[0].methods[0].name, "greet");
    }
}
