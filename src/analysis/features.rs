// Feature grouping from directory conventions

use crate::classify::FileType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name used for files at the project root
pub const ROOT_FEATURE: &str = "root";

/// Single-directory conventions, tried in order after `features`/`modules`
const CONVENTIONS: &[(&[&str], &str)] = &[
    (&["core"], "core"),
    (&["shared", "common"], "shared"),
    (&["utils"], "utils"),
    (&["models"], "models"),
    (&["controllers"], "controllers"),
    (&["services"], "services"),
    (&["repositories"], "repositories"),
];

/// A logical group of files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    /// Files bucketed by primary file type
    pub files: BTreeMap<FileType, Vec<PathBuf>>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, path: PathBuf, file_type: FileType) {
        self.files.entry(file_type).or_default().push(path);
    }

    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Feature a root-relative path belongs to
pub fn feature_name(relative: &Path) -> String {
    let dirs: Vec<String> = relative
        .parent()
        .map(|p| {
            p.iter()
                .map(|s| s.to_string_lossy().into_owned())
                .filter(|s| !s.is_empty() && s != ".")
                .collect()
        })
        .unwrap_or_default();

    // `features/<name>/...` and `modules/<name>/...`
    for (i, dir) in dirs.iter().enumerate() {
        let lower = dir.to_lowercase();
        if lower == "features" || lower == "modules" {
            if let Some(next) = dirs.get(i + 1) {
                return next.clone();
            }
        }
    }

    for (names, feature) in CONVENTIONS {
        if dirs.iter().any(|d| names.contains(&d.to_lowercase().as_str())) {
            return feature.to_string();
        }
    }

    dirs.last().cloned().unwrap_or_else(|| ROOT_FEATURE.to_string())
}

/// Group (path, type) pairs into features keyed by name
pub fn group_features<'a, I>(files: I) -> BTreeMap<String, Feature>
where
    I: IntoIterator<Item = (&'a Path, FileType)>,
{
    let mut features: BTreeMap<String, Feature> = BTreeMap::new();
    for (path, file_type) in files {
        let name = feature_name(path);
        features
            .entry(name.clone())
            .or_insert_with(|| Feature::new(name))
            .add(path.to_path_buf(), file_type);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> String {
        feature_name(Path::new(path))
    }

    #[test]
    fn test_feature_directories() {
        assert_eq!(name("src/features/billing/invoice.service.ts"), "billing");
        assert_eq!(name("src/modules/auth/guards/jwt.guard.ts"), "auth");
        assert_eq!(name("app/core/db.py"), "core");
    }

    #[test]
    fn test_shared_aliases() {
        assert_eq!(name("src/common/logger.ts"), "shared");
        assert_eq!(name("src/shared/ui/button.tsx"), "shared");
    }

    #[test]
    fn test_convention_order() {
        // features wins over a later convention directory
        assert_eq!(name("features/cart/services/cart.ts"), "cart");
        // core is checked before services regardless of depth
        assert_eq!(name("services/core/x.ts"), "core");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(name("lib/parser/lexer.rs"), "parser");
        assert_eq!(name("main.py"), ROOT_FEATURE);
        // a trailing features dir has no name to take
        assert_eq!(name("features/index.ts"), "features");
    }

    #[test]
    fn test_group_features() {
        let a = PathBuf::from("src/features/cart/cart.service.ts");
        let b = PathBuf::from("src/features/cart/cart.component.ts");
        let c = PathBuf::from("main.ts");
        let grouped = group_features(vec![
            (a.as_path(), FileType::Service),
            (b.as_path(), FileType::Component),
            (c.as_path(), FileType::Other),
        ]);

        assert_eq!(grouped.len(), 2);
        let cart = &grouped["cart"];
        assert_eq!(cart.file_count(), 2);
        assert_eq!(cart.files[&FileType::Service], vec![a]);
        assert_eq!(grouped[ROOT_FEATURE].files[&FileType::Other], vec![c]);
    }
}
