//! Copy report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::SpecCopyError;

/// Per-file classification for one `copy_tree` run.
#[derive(Debug, Default, Clone)]
pub struct ReportCopy {
    /// Relative source paths that were copied (or would be, in dry-run).
    pub copied: Vec<PathBuf>,
    /// Relative source paths that were ignored or failed to copy.
    pub skipped: Vec<PathBuf>,
    /// Per-file failures; every entry also appears in `skipped`.
    pub errors: Vec<SpecCopyError>,
    /// Non-fatal warnings collected during traversal.
    pub warnings: Vec<String>,
}

impl ReportCopy {
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of collected hard errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_copied".to_string(), self.copied_count() as u64);
        dict_counts.insert("cnt_skipped".to_string(), self.skipped_count() as u64);
        dict_counts.insert("cnt_errors".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} copied={} skipped={} errors={} warnings={}",
            dict_counts["cnt_copied"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_errors"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for copy results.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    copied: Vec<PathBuf>,
    skipped: Vec<PathBuf>,
    errors: Vec<SpecCopyError>,
    warnings: Vec<String>,
}

impl ReportCopyBuilder {
    pub fn add_copied(&mut self, path_rel: PathBuf) {
        self.copied.push(path_rel);
    }

    pub fn add_skipped(&mut self, path_rel: PathBuf) {
        self.skipped.push(path_rel);
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Record a per-file failure. The file is also classified as skipped.
    pub fn add_error(&mut self, path_rel: PathBuf, exception: String) {
        self.skipped.push(path_rel.clone());
        self.errors.push(SpecCopyError {
            path: path_rel,
            exception,
        });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        ReportCopy {
            copied: self.copied,
            skipped: self.skipped,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ReportCopy, ReportCopyBuilder};

    #[test]
    fn report_copy_to_dict_and_format() {
        let report = ReportCopy {
            copied: vec![PathBuf::from("a.md"), PathBuf::from("b/c.md")],
            skipped: vec![PathBuf::from("node_modules/x.js")],
            warnings: vec!["w".to_string()],
            errors: vec![],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_copied"], 2);
        assert_eq!(dict_counts["cnt_skipped"], 1);
        assert_eq!(dict_counts["cnt_errors"], 0);
        assert_eq!(dict_counts["cnt_warnings"], 1);

        let txt = report.format("[COPY]");
        assert_eq!(txt, "[COPY] copied=2 skipped=1 errors=0 warnings=1");
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn builder_error_also_counts_as_skipped() {
        let mut builder = ReportCopyBuilder::default();
        builder.add_copied(PathBuf::from("ok.md"));
        builder.add_error(PathBuf::from("locked.md"), "Permission denied".to_string());

        let report = builder.build();
        assert_eq!(report.copied, vec![PathBuf::from("ok.md")]);
        assert_eq!(report.skipped, vec![PathBuf::from("locked.md")]);
        assert_eq!(report.errors[0].path, PathBuf::from("locked.md"));
        assert_eq!(report.errors[0].exception, "Permission denied");
    }
}
