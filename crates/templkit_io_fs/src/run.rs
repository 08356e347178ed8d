//! Entry pipeline: validate target, confirm, copy, write placeholder.

use std::path::{Path, PathBuf};

use crate::confirm::{Confirm, EnumConfirmPrompt};
use crate::copy::copy_tree;
use crate::placeholder::ensure_placeholder_doc;
use crate::preflight::{find_prior_outputs, looks_like_project};
use crate::report::ReportCopy;
use crate::spec::{EnumPlaceholderOutcome, RunError, SpecCopyOptions};

/// Inputs for [`run_template_copy`].
#[derive(Debug, Clone)]
pub struct SpecRunOptions {
    /// Template directory to copy from.
    pub dir_source: PathBuf,
    /// Existing project directory to copy into.
    pub dir_target: PathBuf,
    /// Skip both confirmation prompts.
    pub if_force: bool,
    pub spec_cp_options: SpecCopyOptions,
}

/// Everything a caller needs to print the run summary.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub report_copy: ReportCopy,
    /// `None` in dry-run, where the placeholder step is not executed.
    pub placeholder: Option<EnumPlaceholderOutcome>,
}

#[derive(Debug, Clone)]
pub enum EnumRunOutcome {
    /// The pipeline ran to the end.
    Completed(ReportRun),
    /// A confirmation was declined; the target was not modified.
    Cancelled(EnumConfirmPrompt),
}

/// Run the whole template copy.
///
/// Fails fast with [`RunError::TargetMissing`] / [`RunError::TargetNotDirectory`]
/// before anything is written. Unless `if_force` is set, `confirm` is asked when
/// the target does not look like a project and when prior output exists; a
/// `false` answer returns [`EnumRunOutcome::Cancelled`].
pub fn run_template_copy(
    spec_run_options: SpecRunOptions,
    confirm: &mut dyn Confirm,
) -> Result<EnumRunOutcome, RunError> {
    let SpecRunOptions {
        dir_source,
        dir_target,
        if_force,
        spec_cp_options,
    } = spec_run_options;

    validate_target(&dir_target)?;

    if !if_force
        && let Some(prompt) = collect_prompts(&dir_target)
            .into_iter()
            .find(|prompt| !confirm.confirm(prompt))
    {
        tracing::info!(dir_target = %dir_target.display(), "cancelled by user");
        return Ok(EnumRunOutcome::Cancelled(prompt));
    }

    tracing::info!(
        source = %dir_source.display(),
        dir_target = %dir_target.display(),
        "copying template"
    );
    let if_dry_run = spec_cp_options.if_dry_run;
    let report_copy = copy_tree(&dir_source, &dir_target, spec_cp_options)?;

    let placeholder = if if_dry_run {
        None
    } else {
        Some(ensure_placeholder_doc(&dir_target)?)
    };

    tracing::info!(
        copied = report_copy.copied_count(),
        skipped = report_copy.skipped_count(),
        errors = report_copy.error_count(),
        "template copy finished"
    );
    Ok(EnumRunOutcome::Completed(ReportRun {
        report_copy,
        placeholder,
    }))
}

fn validate_target(dir_target: &Path) -> Result<(), RunError> {
    if !dir_target.exists() {
        return Err(RunError::TargetMissing(dir_target.to_path_buf()));
    }
    if !dir_target.is_dir() {
        return Err(RunError::TargetNotDirectory(dir_target.to_path_buf()));
    }
    Ok(())
}

/// Prompts in the order they are asked. Evaluated lazily by the caller so a
/// declined first prompt never shows the second.
fn collect_prompts(dir_target: &Path) -> Vec<EnumConfirmPrompt> {
    let mut l_prompts = Vec::new();
    if !looks_like_project(dir_target) {
        l_prompts.push(EnumConfirmPrompt::NotAProject {
            target: dir_target.to_path_buf(),
        });
    }
    let l_prior = find_prior_outputs(dir_target);
    if !l_prior.is_empty() {
        l_prompts.push(EnumConfirmPrompt::ExistingOutputs {
            target: dir_target.to_path_buf(),
            paths: l_prior,
        });
    }
    l_prompts
}
