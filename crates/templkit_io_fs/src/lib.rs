//! `templkit_io_fs`:
//! copy a template directory into an existing project.
//!
//! Modules:
//! - `ignore`      : ignore-pattern sets and path matching
//! - `copy`        : traversal and copy orchestration
//! - `placeholder` : next-steps document written once into the target
//! - `preflight`   : project-likeness and prior-output checks
//! - `confirm`     : yes/no decision seam for interactive callers
//! - `run`         : end-to-end pipeline
//! - `scan`        : optional markdown classification
//! - `spec`        : enums/options/errors
//! - `report`      : run-time report model
//! - `util`        : shared helper functions

pub mod confirm;
pub mod copy;
pub mod ignore;
pub mod placeholder;
pub mod preflight;
pub mod report;
pub mod run;
pub mod scan;
pub mod spec;
mod util;

pub use confirm::{Confirm, ConfirmFixed, EnumConfirmPrompt};
pub use copy::copy_tree;
pub use ignore::{SpecIgnorePatterns, should_ignore};
pub use placeholder::{CONTENT_PLACEHOLDER_DOC, NAME_PLACEHOLDER_DOC, ensure_placeholder_doc};
pub use report::{ReportCopy, ReportCopyBuilder};
pub use run::{EnumRunOutcome, ReportRun, SpecRunOptions, run_template_copy};
pub use scan::{EnumScanCategory, ReportScan, scan_migration_files};
pub use spec::{
    CopyTreeError, EnumCopySymlinkStrategy, EnumPlaceholderOutcome, RunError, SpecCopyError,
    SpecCopyOptions,
};
