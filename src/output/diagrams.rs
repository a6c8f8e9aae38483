// Mermaid diagram generation
//
// Both diagrams are capped at `max_nodes`. When the cap is hit the best
// connected nodes are kept and a comment records how many were dropped.

use crate::analysis::ProjectModel;
use crate::classify::FileType;
use crate::config::{DiagramConfig, DiagramDirection};
use crate::extract::{ClassSymbol, Visibility};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Methods listed per class before eliding the rest
const METHODS_PER_CLASS: usize = 5;

pub struct DiagramGenerator {
    max_nodes: usize,
    direction: DiagramDirection,
}

impl DiagramGenerator {
    pub fn new() -> Self {
        Self::from_config(&DiagramConfig::default())
    }

    pub fn from_config(config: &DiagramConfig) -> Self {
        Self {
            max_nodes: config.max_nodes.max(1),
            direction: config.direction,
        }
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = max.max(1);
        self
    }

    pub fn with_direction(mut self, direction: DiagramDirection) -> Self {
        self.direction = direction;
        self
    }

    /// File-level import graph, styled by primary file type
    pub fn dependency_graph(&self, model: &ProjectModel) -> String {
        let mut lines = vec![format!("graph {}", self.direction.as_str())];

        let kept = self.select_files(model);
        let omitted = model.dependency_graph.len() - kept.len();

        let mut used_types = BTreeSet::new();
        for (_, node) in model.dependency_graph.iter().filter(|(name, _)| kept.contains(name.as_str())) {
            let label = node
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let style = match node.resolved_type {
                FileType::Other => String::new(),
                t => {
                    used_types.insert(t);
                    format!(":::{}", t.as_str())
                }
            };
            lines.push(format!("    {}[\"{}\"]{}", node_id(&node.path), label, style));
        }

        for (_, node) in model.dependency_graph.iter().filter(|(name, _)| kept.contains(name.as_str())) {
            for dep in node.dependencies.iter().filter(|d| kept.contains(d.as_str())) {
                if let Some(target) = model.node(dep) {
                    lines.push(format!("    {} --> {}", node_id(&node.path), node_id(&target.path)));
                }
            }
        }

        for t in used_types {
            lines.push(format!("    classDef {} {}", t.as_str(), type_style(t)));
        }
        if omitted > 0 {
            lines.push(format!("    %% {} more files omitted", omitted));
        }
        lines.join("\n")
    }

    /// Class diagram with inheritance. `None` when there are no classes.
    pub fn class_diagram(&self, model: &ProjectModel) -> Option<String> {
        let classes: Vec<&ClassSymbol> = model.files.iter().flat_map(|f| f.classes.iter()).collect();
        if classes.is_empty() {
            return None;
        }

        let mut lines = vec![
            "classDiagram".to_string(),
            format!("    direction {}", self.direction.as_str()),
        ];

        let shown = classes.len().min(self.max_nodes);
        for class in classes.iter().take(shown) {
            let name = class_name(&class.name);
            lines.push(format!("    class {} {{", name));
            for property in &class.properties {
                lines.push(format!(
                    "        {}{} {}",
                    visibility_marker(property.visibility),
                    property.type_name,
                    property.name
                ));
            }
            for method in class.methods.iter().take(METHODS_PER_CLASS) {
                lines.push(format!("        {}{}()", visibility_marker(method.visibility), method.name));
            }
            if class.methods.len() > METHODS_PER_CLASS {
                lines.push(format!("        +... {} more", class.methods.len() - METHODS_PER_CLASS));
            }
            lines.push("    }".to_string());

            if let Some(base) = &class.extends {
                lines.push(format!("    {} <|-- {}", class_name(base), name));
            }
            for interface in &class.implements {
                lines.push(format!("    {} <|.. {}", class_name(interface), name));
            }
        }
        if classes.len() > shown {
            lines.push(format!("    %% {} more classes omitted", classes.len() - shown));
        }

        Some(lines.join("\n"))
    }

    /// Basenames to draw: all of them under the cap, otherwise the most
    /// connected
    fn select_files<'m>(&self, model: &'m ProjectModel) -> BTreeSet<&'m str> {
        if model.dependency_graph.len() <= self.max_nodes {
            return model.dependency_graph.keys().map(String::as_str).collect();
        }

        let mut degree: HashMap<&str, usize> = HashMap::new();
        for (name, node) in &model.dependency_graph {
            *degree.entry(name.as_str()).or_default() += node.dependencies.len();
            for dep in &node.dependencies {
                *degree.entry(dep.as_str()).or_default() += 1;
            }
        }

        let mut ranked: Vec<&str> = model.dependency_graph.keys().map(String::as_str).collect();
        ranked.sort_by(|a, b| {
            let da = degree.get(a).copied().unwrap_or(0);
            let db = degree.get(b).copied().unwrap_or(0);
            db.cmp(&da).then_with(|| a.cmp(b))
        });
        ranked.into_iter().take(self.max_nodes).collect()
    }
}

impl Default for DiagramGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn visibility_marker(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "+",
        Visibility::Private => "-",
        Visibility::Protected => "#",
    }
}

fn type_style(file_type: FileType) -> &'static str {
    match file_type {
        FileType::Component | FileType::Directive => "fill:#e3f2fd,stroke:#1e88e5",
        FileType::Service | FileType::Repository => "fill:#e8f5e9,stroke:#43a047",
        FileType::Controller | FileType::Guard | FileType::Interceptor => "fill:#fff3e0,stroke:#fb8c00",
        FileType::Model => "fill:#f3e5f5,stroke:#8e24aa",
        FileType::Test => "fill:#eeeeee,stroke:#9e9e9e",
        FileType::Module | FileType::Utility | FileType::Other => "fill:#fffde7,stroke:#fdd835",
    }
}

/// Mermaid node id for a path
fn node_id(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Last segment of a qualified name, generics stripped
fn class_name(name: &str) -> String {
    let base = name.split('<').next().unwrap_or(name);
    let last = base.rsplit(['.', ':']).next().unwrap_or(base);
    last.chars().filter(|c| c.is_alphanumeric() || *c == '_').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ProjectModelBuilder;
    use crate::classify::FileRoles;
    use crate::config::AnalysisConfig;
    use crate::extract::{ImportEdge, MethodSymbol, SymbolIndex};
    use crate::profile::LanguageId;

    fn file(path: &str, imports: &[&str]) -> SymbolIndex {
        let mut index = SymbolIndex::empty(path, LanguageId::TypeScript);
        index.imports = imports
            .iter()
            .map(|s| ImportEdge {
                specifier: s.to_string(),
                line: 1,
            })
            .collect();
        index
    }

    fn model(files: Vec<SymbolIndex>) -> ProjectModel {
        ProjectModelBuilder::new(LanguageId::TypeScript, &AnalysisConfig::default()).build(files)
    }

    fn method(name: &str, visibility: Visibility) -> MethodSymbol {
        MethodSymbol {
            name: name.to_string(),
            visibility,
            parameters: vec![],
            return_type: "none".to_string(),
            signature: format!("{}()", name),
            is_static: false,
            is_async: false,
            line_start: 1,
            line_end: 1,
        }
    }

    #[test]
    fn test_node_id_and_class_name() {
        assert_eq!(node_id(Path::new("src/app.module.ts")), "src_app_module_ts");
        assert_eq!(class_name("com.acme.Base"), "Base");
        assert_eq!(class_name("Repository<User>"), "Repository");
        assert_eq!(class_name("models::Entity"), "Entity");
    }

    #[test]
    fn test_dependency_graph() {
        let mut service = file("src/user.service.ts", &[]);
        service.roles = FileRoles {
            is_service: true,
            ..FileRoles::default()
        };
        let model = model(vec![file("src/app.ts", &["./user.service"]), service]);

        let diagram = DiagramGenerator::new()
            .with_direction(DiagramDirection::LR)
            .dependency_graph(&model);
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "graph LR");
        assert!(lines.contains(&"    src_app_ts[\"app.ts\"]"));
        assert!(lines.contains(&"    src_user_service_ts[\"user.service.ts\"]:::service"));
        assert!(lines.contains(&"    src_app_ts --> src_user_service_ts"));
        assert!(diagram.contains("classDef service"));
        assert!(!diagram.contains("omitted"));
    }

    #[test]
    fn test_dependency_graph_truncated() {
        let model = model(vec![
            file("hub.ts", &[]),
            file("a.ts", &["./hub"]),
            file("b.ts", &["./hub"]),
            file("lonely.ts", &[]),
        ]);
        let diagram = DiagramGenerator::new().with_max_nodes(2).dependency_graph(&model);

        assert!(diagram.contains("hub_ts[\"hub.ts\"]"));
        assert!(diagram.contains("a_ts --> hub_ts"));
        assert!(!diagram.contains("lonely_ts"));
        assert!(!diagram.contains("    b_ts[\"b.ts\"]"));
        assert!(!diagram.contains("b_ts --> hub_ts"));
        assert!(diagram.ends_with("%% 2 more files omitted"));
    }

    #[test]
    fn test_class_diagram() {
        let mut index = file("src/shapes.ts", &[]);
        let mut circle = ClassSymbol::new("Circle", 1);
        circle.extends = Some("Shape".to_string());
        circle.implements = vec!["Drawable".to_string()];
        circle.methods = vec![method("area", Visibility::Public), method("cache", Visibility::Private)];
        index.classes.push(circle);

        let diagram = DiagramGenerator::new().class_diagram(&model(vec![index])).unwrap();
        assert!(diagram.starts_with("classDiagram\n    direction TB"));
        assert!(diagram.contains("    class Circle {"));
        assert!(diagram.contains("        +area()"));
        assert!(diagram.contains("        -cache()"));
        assert!(diagram.contains("    Shape <|-- Circle"));
        assert!(diagram.contains("    Drawable <|.. Circle"));
    }

    #[test]
    fn test_class_diagram_elides_methods_and_classes() {
        let mut index = file("src/big.ts", &[]);
        let mut big = ClassSymbol::new("Big", 1);
        big.methods = (0..7).map(|i| method(&format!("m{}", i), Visibility::Public)).collect();
        index.classes.push(big);
        index.classes.push(ClassSymbol::new("Small", 20));

        let diagram = DiagramGenerator::new()
            .with_max_nodes(1)
            .class_diagram(&model(vec![index]))
            .unwrap();
        assert!(diagram.contains("+... 2 more"));
        assert!(!diagram.contains("class Small"));
        assert!(diagram.contains("%% 1 more classes omitted"));
    }

    #[test]
    fn test_no_classes() {
        let diagram = DiagramGenerator::new().class_diagram(&model(vec![file("a.ts", &[])]));
        assert!(diagram.is_none());
    }
}
