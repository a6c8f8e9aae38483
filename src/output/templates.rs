// Markdown rendering with Tera

use crate::analysis::{AnalysisResult, ProjectStats};
use crate::classify::Route;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

const ARCHITECTURE: &str = "architecture.md";

/// Template engine wrapping Tera with the embedded markdown template
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(ARCHITECTURE, include_str!("../../templates/architecture.md.tera"))?;
        tera.register_filter("pluralize", pluralize);
        Ok(Self { tera })
    }

    /// Render ARCHITECTURE.md. Diagrams are embedded when given.
    pub fn render_architecture(
        &self,
        analysis: &AnalysisResult,
        project_name: &str,
        diagrams: Option<&Diagrams>,
    ) -> Result<String> {
        let view = ArchitectureView::build(analysis);

        let mut context = Context::new();
        context.insert("project_name", project_name);
        context.insert("language", analysis.language.as_str());
        context.insert("stats", &view.stats);
        context.insert("entry_points", &view.entry_points);
        context.insert("features", &view.features);
        context.insert("classes", &view.classes);
        context.insert("interfaces", &view.interfaces);
        context.insert("functions", &view.functions);
        context.insert("cycles", &view.cycles);
        context.insert("failures", &analysis.failures);
        context.insert("dependency_diagram", &diagrams.map(|d| d.dependencies.as_str()));
        context.insert("class_diagram", &diagrams.and_then(|d| d.classes.as_deref()));

        Ok(self.tera.render(ARCHITECTURE, &context)?)
    }
}

/// Rendered Mermaid sources
#[derive(Debug, Clone, Default)]
pub struct Diagrams {
    pub dependencies: String,
    /// Absent when the project has no classes
    pub classes: Option<String>,
}

#[derive(Debug, Serialize)]
struct EntryView {
    path: String,
    kinds: Vec<&'static str>,
    framework: Option<String>,
    port: Option<u16>,
    routes: Vec<Route>,
}

#[derive(Debug, Serialize)]
struct GroupView {
    file_type: &'static str,
    files: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FeatureView {
    name: String,
    count: usize,
    groups: Vec<GroupView>,
}

#[derive(Debug, Serialize)]
struct MemberView {
    visibility: &'static str,
    signature: String,
}

#[derive(Debug, Serialize)]
struct PropertyView {
    visibility: &'static str,
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug, Serialize)]
struct ClassView {
    name: String,
    path: String,
    line_start: usize,
    line_end: usize,
    extends: Option<String>,
    implements: Vec<String>,
    constructor: Option<String>,
    methods: Vec<MemberView>,
    properties: Vec<PropertyView>,
}

#[derive(Debug, Serialize)]
struct InterfaceView {
    name: String,
    path: String,
    extends: Vec<String>,
    members: usize,
}

#[derive(Debug, Serialize)]
struct FunctionView {
    signature: String,
    path: String,
    visibility: &'static str,
    is_exported: bool,
}

/// Flattened, display-ready copy of the model
struct ArchitectureView {
    stats: ProjectStats,
    entry_points: Vec<EntryView>,
    features: Vec<FeatureView>,
    classes: Vec<ClassView>,
    interfaces: Vec<InterfaceView>,
    functions: Vec<FunctionView>,
    cycles: Vec<Vec<String>>,
}

impl ArchitectureView {
    fn build(analysis: &AnalysisResult) -> Self {
        let model = &analysis.model;
        let display = |p: &std::path::Path| p.display().to_string();

        let entry_points = model
            .entry_points()
            .map(|f| EntryView {
                path: display(&f.path),
                kinds: f.entry.kinds.iter().map(|k| k.as_str()).collect(),
                framework: f
                    .entry
                    .web
                    .as_ref()
                    .map(|w| w.framework.clone())
                    .or_else(|| f.entry.cli_framework.clone()),
                port: f.entry.web.as_ref().and_then(|w| w.port),
                routes: f.entry.web.as_ref().map(|w| w.routes.clone()).unwrap_or_default(),
            })
            .collect();

        let features = model
            .features
            .values()
            .map(|feature| FeatureView {
                name: feature.name.clone(),
                count: feature.file_count(),
                groups: feature
                    .files
                    .iter()
                    .map(|(file_type, files)| GroupView {
                        file_type: file_type.as_str(),
                        files: files.iter().map(|p| display(p)).collect(),
                    })
                    .collect(),
            })
            .collect();

        let mut classes = Vec::new();
        let mut interfaces = Vec::new();
        let mut functions = Vec::new();
        for file in &model.files {
            let path = display(&file.path);
            for class in &file.classes {
                classes.push(ClassView {
                    name: class.name.clone(),
                    path: path.clone(),
                    line_start: class.line_start,
                    line_end: class.line_end,
                    extends: class.extends.clone(),
                    implements: class.implements.clone(),
                    constructor: class.constructor.as_ref().map(|c| c.signature.clone()),
                    methods: class
                        .methods
                        .iter()
                        .map(|m| MemberView {
                            visibility: m.visibility.as_str(),
                            signature: m.signature.clone(),
                        })
                        .collect(),
                    properties: class
                        .properties
                        .iter()
                        .map(|p| PropertyView {
                            visibility: p.visibility.as_str(),
                            name: p.name.clone(),
                            type_name: p.type_name.clone(),
                        })
                        .collect(),
                });
            }
            for interface in &file.interfaces {
                interfaces.push(InterfaceView {
                    name: interface.name.clone(),
                    path: path.clone(),
                    extends: interface.extends.clone(),
                    members: interface.properties.len() + interface.methods.len(),
                });
            }
            for function in file.functions.iter().filter(|f| !f.is_anonymous) {
                functions.push(FunctionView {
                    signature: function.signature.clone(),
                    path: path.clone(),
                    visibility: function.visibility.as_str(),
                    is_exported: function.is_exported,
                });
            }
        }

        let cycles = model
            .cycles()
            .into_iter()
            .map(|c| c.iter().map(|p| display(p)).collect())
            .collect();

        Self {
            stats: model.stats(),
            entry_points,
            features,
            classes,
            interfaces,
            functions,
            cycles,
        }
    }
}

/// `3 | pluralize(singular="file")` -> `3 files`
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args.get("singular").and_then(|v| v.as_str()).unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    let word = if count == 1 { singular } else { plural };
    Ok(Value::String(format!("{} {}", count, word)))
}
