//! Classify markdown documents by content keywords.
//!
//! Read-only helper; it is not part of the copy pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use globset::{Glob, GlobMatcher};
use rayon::prelude::*;
use regex::Regex;

/// Document category recognised by [`scan_migration_files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumScanCategory {
    Strategy,
    Progress,
    Analysis,
    Planning,
    Task,
}

impl EnumScanCategory {
    pub const ALL: [Self; 5] = [
        Self::Strategy,
        Self::Progress,
        Self::Analysis,
        Self::Planning,
        Self::Task,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::Progress => "progress",
            Self::Analysis => "analysis",
            Self::Planning => "planning",
            Self::Task => "task",
        }
    }

    fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Strategy => &[
                r"migration.*strategy",
                r"context.*engineering.*migration",
                r"migration.*plan",
                r"implementation.*roadmap",
            ],
            Self::Progress => &[
                r"migration.*progress",
                r"validation.*report",
                r"phase.*completion",
                r"migration.*status",
            ],
            Self::Analysis => &[
                r"migration.*analysis",
                r"project.*analysis",
                r"codebase.*analysis",
                r"technology.*stack",
            ],
            Self::Planning => &[
                r"planning",
                r"project.*goals",
                r"architecture.*overview",
                r"design.*decisions",
            ],
            Self::Task => &[r"task", r"todo", r"backlog", r"work.*items"],
        }
    }
}

static MAP_CATEGORY_REGEX: LazyLock<Vec<(EnumScanCategory, Vec<Regex>)>> = LazyLock::new(|| {
    EnumScanCategory::ALL
        .iter()
        .map(|&category| {
            let l_regex = category
                .patterns()
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect();
            (category, l_regex)
        })
        .collect()
});

/// Markdown files per category. A file can land in several categories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportScan {
    pub files_by_category: BTreeMap<EnumScanCategory, Vec<PathBuf>>,
}

impl ReportScan {
    pub fn files(&self, category: EnumScanCategory) -> &[PathBuf] {
        self.files_by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Walk `dir_root` for `*.md` files and bucket them by keyword regexes matched
/// against the lowercased content and file name. Unreadable files are skipped.
pub fn scan_migration_files<P: AsRef<Path>>(dir_root: P) -> ReportScan {
    let Ok(matcher_md) = Glob::new("*.md").map(|g| g.compile_matcher()) else {
        return ReportScan::default();
    };
    let mut l_paths = Vec::new();
    collect_markdown_files(dir_root.as_ref(), &matcher_md, &mut l_paths);
    l_paths.sort();

    let l_hits = l_paths
        .into_par_iter()
        .filter_map(|path_md| {
            let c_content = fs::read_to_string(&path_md).ok()?.to_lowercase();
            let c_name = path_md
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let l_categories = classify(&c_content, &c_name);
            Some((path_md, l_categories))
        })
        .collect::<Vec<_>>();

    let mut report_scan = ReportScan::default();
    for (path_md, l_categories) in l_hits {
        for category in l_categories {
            report_scan
                .files_by_category
                .entry(category)
                .or_default()
                .push(path_md.clone());
        }
    }
    tracing::debug!(
        categories = report_scan.files_by_category.len(),
        "markdown scan finished"
    );
    report_scan
}

fn classify(c_content: &str, c_name: &str) -> Vec<EnumScanCategory> {
    MAP_CATEGORY_REGEX
        .iter()
        .filter(|(_, l_regex)| {
            l_regex
                .iter()
                .any(|re| re.is_match(c_content) || re.is_match(c_name))
        })
        .map(|(category, _)| *category)
        .collect()
}

fn collect_markdown_files(path_dir: &Path, matcher_md: &GlobMatcher, l_paths: &mut Vec<PathBuf>) {
    let Ok(iter_entries) = fs::read_dir(path_dir) else {
        return;
    };
    for entry in iter_entries.flatten() {
        let Ok(cfg_file_type) = entry.file_type() else {
            continue;
        };
        let path_entry = entry.path();
        if cfg_file_type.is_dir() {
            collect_markdown_files(&path_entry, matcher_md, l_paths);
        } else if matcher_md.is_match(entry.file_name()) {
            l_paths.push(path_entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{EnumScanCategory, classify, scan_migration_files};

    #[test]
    fn classify_matches_content_and_name() {
        assert_eq!(
            classify("our migration plan for q3", "notes.md"),
            vec![EnumScanCategory::Strategy]
        );
        assert_eq!(classify("", "todo.md"), vec![EnumScanCategory::Task]);
        assert!(classify("hello world", "readme.md").is_empty());
    }

    #[test]
    fn classify_can_hit_several_categories() {
        let l_categories = classify("project analysis and planning backlog", "x.md");
        assert_eq!(
            l_categories,
            vec![
                EnumScanCategory::Analysis,
                EnumScanCategory::Planning,
                EnumScanCategory::Task
            ]
        );
    }

    #[test]
    fn scan_walks_nested_markdown_only() {
        let tmp = TempDir::new().expect("tempdir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("PRPs/migration")).expect("mkdir");
        std::fs::write(root.join("PRPs/migration/strategy.md"), "Migration Strategy").expect("w");
        std::fs::write(root.join("PRPs/TASKS.md"), "nothing here").expect("w");
        std::fs::write(root.join("notes.txt"), "migration plan").expect("w");

        let report_scan = scan_migration_files(root);

        assert_eq!(
            report_scan.files(EnumScanCategory::Strategy),
            &[root.join("PRPs/migration/strategy.md")]
        );
        assert_eq!(
            report_scan.files(EnumScanCategory::Task),
            &[root.join("PRPs/TASKS.md")]
        );
        assert!(report_scan.files(EnumScanCategory::Progress).is_empty());
    }

    #[test]
    fn scan_missing_dir_is_empty() {
        let report_scan = scan_migration_files(PathBuf::from("/definitely/not/here"));
        assert!(report_scan.files_by_category.is_empty());
    }
}
