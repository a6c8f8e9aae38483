// Project-wide model: basename lookup, dependency graph and features
//
// The dependency graph is keyed by basename, like the lookup, so a basename
// collision leaves a single node for the file that won the lookup.

use super::features::{group_features, Feature};
use super::imports::{ImportKind, ImportResolver};
use crate::classify::FileType;
use crate::config::AnalysisConfig;
use crate::extract::SymbolIndex;
use crate::profile::LanguageId;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One file in the dependency graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyNode {
    pub path: PathBuf,
    pub resolved_type: FileType,
    /// Basenames of the project files this file imports, in import order
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub files: usize,
    pub lines: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub functions: usize,
    pub imports: usize,
    pub dependency_edges: usize,
    pub entry_points: usize,
    pub features: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectModel {
    pub language: LanguageId,
    pub files: Vec<SymbolIndex>,
    /// Basename to path; on collision the last file processed wins
    pub lookup: BTreeMap<String, PathBuf>,
    /// Basename to node, with the same collision rule as `lookup`
    pub dependency_graph: BTreeMap<String, DependencyNode>,
    pub features: BTreeMap<String, Feature>,
}

impl ProjectModel {
    pub fn file(&self, path: &Path) -> Option<&SymbolIndex> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn node(&self, basename: &str) -> Option<&DependencyNode> {
        self.dependency_graph.get(basename)
    }

    /// Node for a file path, if that file won its basename
    pub fn node_for_path(&self, path: &Path) -> Option<&DependencyNode> {
        self.dependency_graph.values().find(|n| n.path == path)
    }

    /// Basenames of the files that import `basename`
    pub fn dependents_of(&self, basename: &str) -> Vec<&str> {
        self.dependency_graph
            .iter()
            .filter(|(_, n)| n.dependencies.iter().any(|d| d == basename))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn entry_points(&self) -> impl Iterator<Item = &SymbolIndex> {
        self.files.iter().filter(|f| f.entry.is_entry_point)
    }

    pub fn edge_count(&self) -> usize {
        self.dependency_graph.values().map(|n| n.dependencies.len()).sum()
    }

    /// Groups of files that import each other, each sorted, largest first
    pub fn cycles(&self) -> Vec<Vec<PathBuf>> {
        let mut graph: DiGraph<&Path, ()> = DiGraph::new();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();
        for (name, node) in &self.dependency_graph {
            indices.insert(name.as_str(), graph.add_node(node.path.as_path()));
        }
        for (name, node) in &self.dependency_graph {
            let from = indices[name.as_str()];
            for dep in &node.dependencies {
                if let Some(to) = indices.get(dep.as_str()) {
                    graph.add_edge(from, *to, ());
                }
            }
        }
        let mut cycles: Vec<Vec<PathBuf>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut paths: Vec<PathBuf> = scc.iter().map(|i| graph[*i].to_path_buf()).collect();
                paths.sort();
                paths
            })
            .collect();
        cycles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        cycles
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats {
            files: self.files.len(),
            lines: self.files.iter().map(|f| f.line_count).sum(),
            classes: self.files.iter().map(|f| f.classes.len()).sum(),
            interfaces: self.files.iter().map(|f| f.interfaces.len()).sum(),
            functions: self.files.iter().map(|f| f.functions.len()).sum(),
            imports: self.files.iter().map(|f| f.imports.len()).sum(),
            dependency_edges: self.edge_count(),
            entry_points: self.entry_points().count(),
            features: self.features.len(),
        }
    }
}

/// Aggregates per-file indexes into a [`ProjectModel`]
pub struct ProjectModelBuilder {
    language: LanguageId,
    config: AnalysisConfig,
    go_module: Option<String>,
}

impl ProjectModelBuilder {
    pub fn new(language: LanguageId, config: &AnalysisConfig) -> Self {
        Self {
            language,
            config: config.clone(),
            go_module: None,
        }
    }

    /// Module path from the project's `go.mod`
    pub fn with_go_module(mut self, module: Option<String>) -> Self {
        self.go_module = module;
        self
    }

    pub fn build(&self, files: Vec<SymbolIndex>) -> ProjectModel {
        let lookup = build_lookup(&files);
        let resolver = ImportResolver::new(self.language, &self.config)
            .with_project_paths(files.iter().map(|f| f.path.as_path()))
            .with_go_module(self.go_module.clone());

        let mut dependency_graph = BTreeMap::new();
        for index in &files {
            let node = DependencyNode {
                path: index.path.clone(),
                resolved_type: index.primary_type(),
                dependencies: resolve_dependencies(&resolver, index, &lookup),
            };
            dependency_graph.insert(index.basename(), node);
        }

        let features = group_features(files.iter().map(|f| (f.path.as_path(), f.primary_type())));

        ProjectModel {
            language: self.language,
            files,
            lookup,
            dependency_graph,
            features,
        }
    }
}

fn resolve_dependencies(
    resolver: &ImportResolver,
    index: &SymbolIndex,
    lookup: &BTreeMap<String, PathBuf>,
) -> Vec<String> {
    let own = index.basename();
    let mut deps: Vec<String> = Vec::new();

    for import in &index.imports {
        if resolver.classify(&import.specifier) == ImportKind::External {
            continue;
        }
        let target = resolver
            .candidates(&import.specifier, &index.path)
            .into_iter()
            .find(|name| lookup.contains_key(name));

        match target {
            Some(name) if name != own && !deps.contains(&name) => deps.push(name),
            Some(_) => {}
            None => debug!(
                file = %index.path.display(),
                specifier = %import.specifier,
                "import not resolved"
            ),
        }
    }
    deps
}

/// Basename lookup in file order, so later files overwrite earlier ones
pub fn build_lookup(files: &[SymbolIndex]) -> BTreeMap<String, PathBuf> {
    let mut lookup = BTreeMap::new();
    for index in files {
        if let Some(previous) = lookup.insert(index.basename(), index.path.clone()) {
            debug!(
                basename = %index.basename(),
                previous = %previous.display(),
                current = %index.path.display(),
                "basename collision, keeping the later file"
            );
        }
    }
    lookup
}
