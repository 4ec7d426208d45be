//! Dependency set entity
//!
//! Declares which files affect a build and fingerprints them.
//!
//! A set is declared once (see [`requirements`]), then localized per
//! service instance before any file is looked at.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::WalkBuilder;
use sha2::{Digest, Sha256};

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::Fingerprint;
use crate::error::{AgentError, AgentResult};

/// One build input: a path relative to the service root, optionally
/// narrowed to files matching a glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    path: String,
    select: Option<String>,
}

impl Dependency {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            select: None,
        }
    }

    /// Only consider files whose name matches `pattern` (gitignore syntax)
    pub fn with_path_select(mut self, pattern: impl Into<String>) -> Self {
        self.select = Some(pattern.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    fn selector(&self, root: &Path) -> AgentResult<Option<Gitignore>> {
        let Some(pattern) = &self.select else {
            return Ok(None);
        };
        let mut builder = GitignoreBuilder::new(root);
        builder
            .add_line(None, pattern)
            .map_err(|e| invalid_rule(root, &self.path, e))?;
        let matcher = builder
            .build()
            .map_err(|e| invalid_rule(root, &self.path, e))?;
        Ok(Some(matcher))
    }
}

fn invalid_rule(root: &Path, path: &str, err: ignore::Error) -> AgentError {
    AgentError::Configuration {
        path: root.join(path),
        message: format!("invalid dependency rule: {}", err),
    }
}

/// Named, ordered group of build inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySet {
    name: String,
    components: Vec<Dependency>,
    root: Option<PathBuf>,
}

impl DependencySet {
    pub fn new(name: impl Into<String>, components: Vec<Dependency>) -> Self {
        Self {
            name: name.into(),
            components,
            root: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind every rule to `root`. No file is read here.
    pub fn localize(&mut self, root: impl Into<PathBuf>) {
        self.root = Some(root.into());
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Declared paths, in declaration order
    pub fn all(&self) -> Vec<String> {
        self.components.iter().map(|c| c.path.clone()).collect()
    }

    pub fn components(&self) -> &[Dependency] {
        &self.components
    }

    fn localized_root(&self) -> AgentResult<&Path> {
        self.root.as_deref().ok_or_else(|| AgentError::Configuration {
            path: PathBuf::from(&self.name),
            message: "dependency set used before being localized".to_string(),
        })
    }

    /// Files currently matched by the rules, relative to the root, sorted.
    ///
    /// Rules pointing at paths that do not exist yet match nothing.
    pub fn matched_files(&self) -> AgentResult<Vec<PathBuf>> {
        let root = self.localized_root()?;
        let mut matched = BTreeSet::new();

        for component in &self.components {
            let base = root.join(&component.path);
            if !base.exists() {
                continue;
            }
            let selector = component.selector(&base)?;

            let walker = WalkBuilder::new(&base)
                .standard_filters(false)
                .hidden(true)
                .sort_by_file_path(|a, b| a.cmp(b))
                .build();

            for entry in walker {
                let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = entry.path();
                if let Some(selector) = &selector {
                    let name = path.file_name().map(Path::new).unwrap_or(path);
                    if !selector.matched(name, false).is_ignore() {
                        continue;
                    }
                }
                let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
                matched.insert(relative);
            }
        }

        Ok(matched.into_iter().collect())
    }

    /// Hash of every matched file's relative path and content.
    ///
    /// Files are discovered on disk by [`matched_files`](Self::matched_files)
    /// and their content is read through `fs`. Identical content gives an
    /// identical fingerprint regardless of walk order or timestamps.
    pub fn fingerprint<FS: FileSystem + ?Sized>(&self, fs: &FS) -> AgentResult<Fingerprint> {
        let root = self.localized_root()?;
        let mut hasher = Sha256::new();
        for relative in self.matched_files()? {
            let content = fs.read(&root.join(&relative))?;
            hasher.update(relative.to_string_lossy().replace('\\', "/").as_bytes());
            hasher.update([0u8]);
            hasher.update(content.as_bytes());
            hasher.update([0u8]);
        }
        Ok(Fingerprint::from_hasher(hasher))
    }
}

/// Build inputs of a Python service managed by this agent
pub fn requirements(agent: &str) -> DependencySet {
    DependencySet::new(
        agent,
        vec![
            Dependency::new("service.yaml"),
            Dependency::new("src/pyproject.toml"),
            Dependency::new("src").with_path_select("*.py"),
        ],
    )
}
