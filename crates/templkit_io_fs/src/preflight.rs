//! Heuristics checked against the target before copying.

use std::path::{Path, PathBuf};

/// Top-level entries whose presence suggests a software project.
pub const NAMES_PROJECT_MARKERS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    ".git",
    "src",
    "lib",
    "app",
];

/// Top-level entries an earlier template run leaves behind.
pub const NAMES_PRIOR_OUTPUTS: &[&str] = &[
    ".claude",
    "PRPs",
    "CLAUDE.md",
    "MIGRATION_ANALYSIS.md",
];

pub fn looks_like_project(dir_target: &Path) -> bool {
    NAMES_PROJECT_MARKERS
        .iter()
        .any(|name| dir_target.join(name).exists())
}

/// Prior outputs present in `dir_target`, in [`NAMES_PRIOR_OUTPUTS`] order.
pub fn find_prior_outputs(dir_target: &Path) -> Vec<PathBuf> {
    NAMES_PRIOR_OUTPUTS
        .iter()
        .filter(|name| dir_target.join(name).exists())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{find_prior_outputs, looks_like_project};

    #[test]
    fn empty_dir_is_not_a_project() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(!looks_like_project(tmp.path()));
        assert!(find_prior_outputs(tmp.path()).is_empty());
    }

    #[test]
    fn marker_file_or_dir_counts() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("src")).expect("mkdir");
        assert!(looks_like_project(tmp.path()));

        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("go.mod"), "module x").expect("write");
        assert!(looks_like_project(tmp.path()));
    }

    #[test]
    fn prior_outputs_listed_in_fixed_order() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("MIGRATION_ANALYSIS.md"), "x").expect("write");
        std::fs::create_dir(tmp.path().join(".claude")).expect("mkdir");

        assert_eq!(
            find_prior_outputs(tmp.path()),
            vec![PathBuf::from(".claude"), PathBuf::from("MIGRATION_ANALYSIS.md")]
        );
    }
}
