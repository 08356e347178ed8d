//! Next-steps document written once into the target root.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::spec::{EnumPlaceholderOutcome, RunError};

/// File name of the placeholder document.
pub const NAME_PLACEHOLDER_DOC: &str = "MIGRATION_ANALYSIS.md";

/// Fixed content of [`NAME_PLACEHOLDER_DOC`].
pub const CONTENT_PLACEHOLDER_DOC: &str = r#"# Migration Analysis Report

*This file will be generated when you run `/analyze-existing-project`*

## Quick Start

1. Run the project analysis:
   ```
   /analyze-existing-project
   ```

2. Extract existing project context:
   ```
   /extract-project-context
   ```

3. Generate migration strategy:
   ```
   /generate-migration-strategy MIGRATION_ANALYSIS.md
   ```

4. Execute migration phases:
   ```
   /execute-migration-phase PRPs/migration-strategy.md --phase=1
   ```

5. Validate progress:
   ```
   /validate-migration-progress
   ```

## Context Engineering Migration Commands

The following Claude Code commands are now available in your project:

- `/analyze-existing-project` - Comprehensive codebase analysis
- `/extract-project-context` - Knowledge extraction and documentation
- `/generate-migration-strategy` - Strategic migration planning
- `/execute-migration-phase` - Incremental implementation
- `/validate-migration-progress` - Quality validation and metrics

## Directory Structure Added

```
.claude/commands/        # Migration-specific commands
PRPs/                   # Problem-Reasoning-Plan documents
├── ai_docs/           # Extracted knowledge base
├── templates/         # PRP templates
└── migration/         # Migration-specific PRPs
examples/              # Migration examples and patterns
CLAUDE.md              # Global context engineering rules
```

## Next Steps

1. **Read the migration README**: `README_TEMPLATE.md` contains comprehensive migration guidance
2. **Run project analysis**: Start with `/analyze-existing-project` to understand your codebase
3. **Review extracted context**: Examine the generated documentation in `PRPs/ai_docs/`
4. **Plan migration strategy**: Use the analysis to create a phased migration plan
5. **Execute incrementally**: Implement context engineering practices gradually

For detailed guidance, see `README_TEMPLATE.md`.
"#;

/// Write [`NAME_PLACEHOLDER_DOC`] into `dir_target` unless something with that
/// name is already there. Never overwrites.
pub fn ensure_placeholder_doc<P: AsRef<Path>>(
    dir_target: P,
) -> Result<EnumPlaceholderOutcome, RunError> {
    let path_doc = dir_target.as_ref().join(NAME_PLACEHOLDER_DOC);
    if path_doc.symlink_metadata().is_ok() {
        return Ok(EnumPlaceholderOutcome::AlreadyPresent);
    }

    let res_open = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path_doc);
    let file_doc = match res_open {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(EnumPlaceholderOutcome::AlreadyPresent);
        }
        Err(e) => {
            return Err(RunError::Placeholder {
                path: path_doc,
                source: e,
            });
        }
    };
    write_doc_or_remove(file_doc, &path_doc)?;

    tracing::info!(path = %path_doc.display(), "created placeholder");
    Ok(EnumPlaceholderOutcome::Created)
}

/// Removes `path_doc` again when the write fails; a partial file would count
/// as present on later runs.
fn write_doc_or_remove<W: Write>(mut writer: W, path_doc: &Path) -> Result<(), RunError> {
    let res_write = writer
        .write_all(CONTENT_PLACEHOLDER_DOC.as_bytes())
        .and_then(|()| writer.flush());
    if let Err(e) = res_write {
        drop(writer);
        if let Err(e_remove) = fs::remove_file(path_doc) {
            tracing::warn!(
                path = %path_doc.display(),
                error = %e_remove,
                "failed to remove partial placeholder"
            );
        }
        return Err(RunError::Placeholder {
            path: path_doc.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use std::io::{self, Write};

    use super::{
        CONTENT_PLACEHOLDER_DOC, NAME_PLACEHOLDER_DOC, ensure_placeholder_doc, write_doc_or_remove,
    };
    use crate::spec::{EnumPlaceholderOutcome, RunError};

    #[test]
    fn placeholder_created_once() {
        let tmp = TempDir::new().expect("tempdir");

        let first = ensure_placeholder_doc(tmp.path()).expect("first");
        let second = ensure_placeholder_doc(tmp.path()).expect("second");

        assert_eq!(first, EnumPlaceholderOutcome::Created);
        assert_eq!(second, EnumPlaceholderOutcome::AlreadyPresent);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(NAME_PLACEHOLDER_DOC)).expect("read"),
            CONTENT_PLACEHOLDER_DOC
        );
    }

    #[test]
    fn placeholder_never_overwrites_user_content() {
        let tmp = TempDir::new().expect("tempdir");
        let path_doc = tmp.path().join(NAME_PLACEHOLDER_DOC);
        std::fs::write(&path_doc, "my analysis").expect("write");

        let outcome = ensure_placeholder_doc(tmp.path()).expect("ensure");

        assert_eq!(outcome, EnumPlaceholderOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&path_doc).expect("read"), "my analysis");
    }

    #[test]
    fn placeholder_missing_target_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = ensure_placeholder_doc(tmp.path().join("missing")).expect_err("must fail");
        assert!(matches!(err, RunError::Placeholder { .. }));
    }

    /// Accepts a few bytes, then fails like a full disk.
    struct WriterDiskFull {
        n_left: usize,
    }

    impl Write for WriterDiskFull {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.n_left == 0 {
                return Err(io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.n_left);
            self.n_left -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn placeholder_failed_write_removes_partial_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path_doc = tmp.path().join(NAME_PLACEHOLDER_DOC);
        std::fs::write(&path_doc, "# Migra").expect("write partial");

        let err = write_doc_or_remove(WriterDiskFull { n_left: 7 }, &path_doc)
            .expect_err("must fail");

        assert!(matches!(err, RunError::Placeholder { .. }));
        assert!(!path_doc.exists());
        assert_eq!(
            ensure_placeholder_doc(tmp.path()).expect("retry"),
            EnumPlaceholderOutcome::Created
        );
    }

    #[test]
    fn placeholder_content_keeps_command_heading() {
        let c_heading = "The following Claude Code commands are now available in your project:";
        assert!(CONTENT_PLACEHOLDER_DOC.contains(c_heading));
    }

    #[test]
    fn placeholder_content_points_at_renamed_readme() {
        assert!(CONTENT_PLACEHOLDER_DOC.starts_with("# Migration Analysis Report"));
        assert!(CONTENT_PLACEHOLDER_DOC.contains("README_TEMPLATE.md"));
    }
}
