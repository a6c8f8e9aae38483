// File-role classification from naming conventions and decorators

use super::RoleClassifier;
use crate::extract::DecoratorSymbol;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Single-label file type. Declaration order is precedence order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Component,
    Service,
    Controller,
    Guard,
    Interceptor,
    Directive,
    Repository,
    Model,
    Module,
    Utility,
    Test,
    #[default]
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Component => "component",
            FileType::Service => "service",
            FileType::Controller => "controller",
            FileType::Guard => "guard",
            FileType::Interceptor => "interceptor",
            FileType::Directive => "directive",
            FileType::Repository => "repository",
            FileType::Model => "model",
            FileType::Module => "module",
            FileType::Utility => "utility",
            FileType::Test => "test",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent role flags; several may hold at once
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRoles {
    pub is_component: bool,
    pub is_service: bool,
    pub is_controller: bool,
    pub is_guard: bool,
    pub is_interceptor: bool,
    pub is_directive: bool,
    pub is_repository: bool,
    pub is_model: bool,
    pub is_module: bool,
    pub is_utility: bool,
    pub is_config: bool,
    pub is_test: bool,
}

impl FileRoles {
    /// Highest-precedence role, `Other` when none is set
    pub fn primary_type(&self) -> FileType {
        let ranked = [
            (self.is_component, FileType::Component),
            (self.is_service, FileType::Service),
            (self.is_controller, FileType::Controller),
            (self.is_guard, FileType::Guard),
            (self.is_interceptor, FileType::Interceptor),
            (self.is_directive, FileType::Directive),
            (self.is_repository, FileType::Repository),
            (self.is_model, FileType::Model),
            (self.is_module, FileType::Module),
            (self.is_utility, FileType::Utility),
            (self.is_test, FileType::Test),
        ];
        ranked
            .iter()
            .find(|(set, _)| *set)
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }

    /// Names of every flag that is set
    pub fn labels(&self) -> Vec<&'static str> {
        let flags = [
            (self.is_component, "component"),
            (self.is_service, "service"),
            (self.is_controller, "controller"),
            (self.is_guard, "guard"),
            (self.is_interceptor, "interceptor"),
            (self.is_directive, "directive"),
            (self.is_repository, "repository"),
            (self.is_model, "model"),
            (self.is_module, "module"),
            (self.is_utility, "utility"),
            (self.is_config, "config"),
            (self.is_test, "test"),
        ];
        flags.iter().filter(|(set, _)| *set).map(|(_, l)| *l).collect()
    }
}

/// Keyword lists: substrings of the file name, directory names, decorators
struct Signals {
    names: &'static [&'static str],
    dirs: &'static [&'static str],
    decorators: &'static [&'static str],
}

const COMPONENT: Signals = Signals {
    names: &["component"],
    dirs: &["components", "component", "views", "pages"],
    decorators: &["Component"],
};

const SERVICE: Signals = Signals {
    names: &["service"],
    dirs: &["services", "service"],
    decorators: &["Injectable", "Service"],
};

const CONTROLLER: Signals = Signals {
    names: &["controller"],
    dirs: &["controllers", "controller", "handlers", "routes"],
    decorators: &["Controller", "RestController"],
};

const GUARD: Signals = Signals {
    names: &["guard"],
    dirs: &["guards"],
    decorators: &[],
};

const INTERCEPTOR: Signals = Signals {
    names: &["interceptor", "middleware"],
    dirs: &["interceptors", "middleware", "middlewares"],
    decorators: &[],
};

const DIRECTIVE: Signals = Signals {
    names: &["directive"],
    dirs: &["directives"],
    decorators: &["Directive"],
};

const REPOSITORY: Signals = Signals {
    names: &["repository", "repo", "dao"],
    dirs: &["repositories", "repository", "repos", "dao"],
    decorators: &["Repository", "EntityRepository"],
};

const MODEL: Signals = Signals {
    names: &["model", "entity", "schema", "dto"],
    dirs: &["models", "model", "entities", "schemas", "dto"],
    decorators: &["Entity", "Table", "Schema", "dataclass"],
};

const MODULE: Signals = Signals {
    names: &[".module", "__init__"],
    dirs: &[],
    decorators: &["NgModule", "Module"],
};

const UTILITY: Signals = Signals {
    names: &["util", "helper", ".pipe"],
    dirs: &["utils", "util", "helpers", "lib"],
    decorators: &["Pipe"],
};

const CONFIG: Signals = Signals {
    names: &["config", "settings", ".conf"],
    dirs: &["config", "configs", "settings"],
    decorators: &["Configuration"],
};

/// Naming and decorator heuristics
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicRoleClassifier;

impl RoleClassifier for HeuristicRoleClassifier {
    fn classify(&self, path: &Path, decorators: &[DecoratorSymbol]) -> FileRoles {
        let file = FileName::new(path);
        let matches = |s: &Signals| file.matches(s, decorators);

        FileRoles {
            is_component: matches(&COMPONENT),
            is_service: matches(&SERVICE),
            is_controller: matches(&CONTROLLER),
            is_guard: matches(&GUARD),
            is_interceptor: matches(&INTERCEPTOR),
            is_directive: matches(&DIRECTIVE),
            is_repository: matches(&REPOSITORY),
            is_model: matches(&MODEL),
            is_module: matches(&MODULE),
            is_utility: matches(&UTILITY),
            is_config: matches(&CONFIG),
            is_test: file.is_test(),
        }
    }
}

struct FileName {
    /// File stem as written (`UserServiceTest`)
    stem: String,
    /// Lowercased stem (`user.service`)
    lower: String,
    /// Lowercased words of the stem (`UserDAO` -> `user`, `dao`)
    words: Vec<String>,
    dirs: Vec<String>,
}

impl FileName {
    fn new(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dirs = path
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
                    .collect()
            })
            .unwrap_or_default();
        Self {
            lower: stem.to_lowercase(),
            words: split_words(&stem),
            stem,
            dirs,
        }
    }

    /// `.module` names a dotted suffix segment; other names a whole word,
    /// optionally plural
    fn has_name(&self, name: &str) -> bool {
        if self.lower == name {
            return true;
        }
        if let Some(segment) = name.strip_prefix('.') {
            return self.lower.split('.').skip(1).any(|s| s == segment);
        }
        self.words
            .iter()
            .any(|w| w == name || w.strip_suffix('s') == Some(name))
    }

    fn matches(&self, signals: &Signals, decorators: &[DecoratorSymbol]) -> bool {
        signals.names.iter().any(|n| self.has_name(n))
            || self.dirs.iter().any(|d| signals.dirs.contains(&d.as_str()))
            || decorators.iter().any(|d| {
                let short = d.name.rsplit('.').next().unwrap_or(&d.name);
                signals.decorators.contains(&short)
            })
    }

    fn is_test(&self) -> bool {
        let lower = &self.lower;
        lower.starts_with("test_")
            || lower.ends_with("_test")
            || lower.ends_with(".test")
            || lower.ends_with(".spec")
            || lower.ends_with("_spec")
            || self.stem.ends_with("Test")
            || self.stem.ends_with("Tests")
            || self
                .dirs
                .iter()
                .any(|d| matches!(d.as_str(), "test" | "tests" | "__tests__" | "spec"))
    }
}

/// Split a file stem on `.`, `_`, `-` and case changes
fn split_words(stem: &str) -> Vec<String> {
    let chars: Vec<char> = stem.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '.' | '_' | '-' | ' ') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current).to_lowercase());
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit();
            // `DAOFactory`: the last capital of a run starts the next word
            let run_ends = chars[i - 1].is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower || run_ends {
                words.push(std::mem::take(&mut current).to_lowercase());
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}
