//! Ignore-pattern sets and path matching.
//!
//! Literal patterns use substring-or-suffix matching on the `/`-separated
//! relative path, not glob semantics. A pattern ending in `/` is a directory
//! pattern. Optional glob patterns are matched with `globset` against the same
//! path string.

use std::path::{Component, Path};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::spec::CopyTreeError;

/// Build-artifact and dependency paths that never belong in a template copy.
pub const PATTERNS_BUILD_ARTIFACTS: &[&str] = &[
    "node_modules/",
    "__pycache__/",
    "*.pyc",
    ".env",
    ".env.local",
    ".env.*.local",
    "dist/",
    "build/",
    ".next/",
    ".nuxt/",
    "target/",
    "bin/",
    "obj/",
    "*.log",
    ".DS_Store",
    "Thumbs.db",
    ".vscode/",
    ".idea/",
    "*.swp",
    "*.swo",
    "*.tmp",
    ".git/",
    ".svn/",
    ".hg/",
    "coverage/",
    ".coverage",
    ".nyc_output/",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
];

/// Appended after the copier's own file name in [`SpecIgnorePatterns::for_template`].
pub const PATTERNS_TEMPLATE_EXTRA: &[&str] = &["__pycache__/", "*.pyc", ".git/"];

/// Ordered ignore patterns. First match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecIgnorePatterns {
    /// Literal substring/suffix patterns.
    pub patterns_literal: Vec<String>,
    /// Glob patterns (`*`, `?`, `**`, classes); empty unless a caller opts in.
    pub patterns_glob: Vec<String>,
}

impl SpecIgnorePatterns {
    pub fn from_literals<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns_literal: patterns.into_iter().map(Into::into).collect(),
            patterns_glob: Vec::new(),
        }
    }

    /// Build-artifact patterns followed by the copier's own file name and the
    /// template extras.
    pub fn for_template(name_self: &str) -> Self {
        let mut spec_pats = Self::from_literals(PATTERNS_BUILD_ARTIFACTS.iter().copied());
        if !name_self.is_empty() {
            spec_pats.patterns_literal.push(name_self.to_string());
        }
        spec_pats
            .patterns_literal
            .extend(PATTERNS_TEMPLATE_EXTRA.iter().map(|p| p.to_string()));
        spec_pats
    }

    pub fn push_literal(&mut self, pattern: impl Into<String>) {
        self.patterns_literal.push(pattern.into());
    }

    pub fn push_glob(&mut self, pattern: impl Into<String>) {
        self.patterns_glob.push(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.patterns_literal.is_empty() && self.patterns_glob.is_empty()
    }
}

/// Compiled form of [`SpecIgnorePatterns`], built once per copy run.
#[derive(Debug, Clone)]
pub(crate) struct SpecIgnoreMatcher {
    patterns_literal: Vec<String>,
    set_glob: Option<GlobSet>,
}

impl SpecIgnoreMatcher {
    /// Fails on glob syntax errors and on literals that are empty or only `/`,
    /// since those would ignore every file.
    pub(crate) fn compile(spec_pats: &SpecIgnorePatterns) -> Result<Self, CopyTreeError> {
        if let Some(pattern) = spec_pats
            .patterns_literal
            .iter()
            .find(|p| p.trim_matches('/').is_empty())
        {
            return Err(CopyTreeError::InvalidPattern(format!(
                "Ignore pattern `{pattern}` would match every path"
            )));
        }
        let set_glob = if spec_pats.patterns_glob.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &spec_pats.patterns_glob {
                let glob = Glob::new(pattern).map_err(|e| {
                    CopyTreeError::InvalidPattern(format!("Invalid ignore glob `{pattern}`: {e}"))
                })?;
                builder.add(glob);
            }
            Some(builder.build().map_err(|e| {
                CopyTreeError::InvalidPattern(format!("Invalid ignore glob set: {e}"))
            })?)
        };
        Ok(Self {
            patterns_literal: spec_pats.patterns_literal.clone(),
            set_glob,
        })
    }

    /// Returns the first literal pattern that matches, or `"<glob>"` for a glob hit.
    pub(crate) fn find_match(&self, path_rel: &Path) -> Option<&str> {
        let c_path = to_match_string(path_rel);
        if let Some(pattern) = self
            .patterns_literal
            .iter()
            .find(|p| is_literal_match(&c_path, p))
        {
            return Some(pattern.as_str());
        }
        match &self.set_glob {
            Some(set_glob) if set_glob.is_match(&c_path) => Some("<glob>"),
            _ => None,
        }
    }
}

/// Returns true if `path_rel` matches any literal pattern in `patterns`.
///
/// - Directory pattern `p/`: `/p/` occurs inside `/path/`, or the path ends
///   with `p`.
/// - File pattern `p`: the path ends with or contains `p`.
///
/// Matching is plain text; `bin/` also matches `robin` because the suffix check
/// is not segment aware, and `""` or `/` match every path.
pub fn should_ignore<S: AsRef<str>>(path_rel: &Path, patterns: &[S]) -> bool {
    let c_path = to_match_string(path_rel);
    patterns
        .iter()
        .any(|p| is_literal_match(&c_path, p.as_ref()))
}

fn is_literal_match(c_path: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('/') {
        Some(name_dir) => {
            format!("/{c_path}/").contains(&format!("/{pattern}")) || c_path.ends_with(name_dir)
        }
        None => c_path.ends_with(pattern) || c_path.contains(pattern),
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub(crate) fn to_match_string(path_rel: &Path) -> String {
    path_rel
        .components()
        .filter_map(|part| match part {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
