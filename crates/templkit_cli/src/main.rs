mod cli;
mod logger;
mod prompt;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use templkit_io_fs::{
    EnumPlaceholderOutcome, EnumRunOutcome, EnumScanCategory, NAME_PLACEHOLDER_DOC, ReportRun,
    run_template_copy, scan_migration_files,
};

use crate::cli::CliArgs;
use crate::prompt::ConfirmTerminal;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("template copy failed: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let spec_run_options = args.to_run_options()?;
    let dir_target = spec_run_options.dir_target.clone();

    let outcome = run_template_copy(spec_run_options, &mut ConfirmTerminal)?;
    let report_run = match outcome {
        EnumRunOutcome::Completed(report_run) => report_run,
        EnumRunOutcome::Cancelled(_) => {
            println!("Migration cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    };

    print_summary(&report_run, args.dry_run);

    if args.scan {
        let report_scan = scan_migration_files(&dir_target);
        println!();
        println!("Markdown documents by category:");
        for category in EnumScanCategory::ALL {
            println!(
                "  {:<9} {}",
                category.as_str(),
                report_scan.files(category).len()
            );
        }
    }

    if report_run.report_copy.error_count() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(report_run: &ReportRun, if_dry_run: bool) {
    let report_copy = &report_run.report_copy;
    for spec_error in &report_copy.errors {
        eprintln!(
            "[ERR] Error copying {}: {}",
            spec_error.path.display(),
            spec_error.exception
        );
    }
    for warning in &report_copy.warnings {
        tracing::warn!("{warning}");
    }
    if report_run.placeholder == Some(EnumPlaceholderOutcome::Created) {
        println!("[OK] Created: {NAME_PLACEHOLDER_DOC}");
    }

    let c_banner = "=".repeat(60);
    println!();
    println!("{c_banner}");
    if if_dry_run {
        println!("Dry run: nothing was written");
    } else {
        println!("Migration Template Copy Complete!");
    }
    println!("{c_banner}");
    println!("[OK] Copied {} files", report_copy.copied_count());
    println!(
        "[SKIP] Skipped {} files (build artifacts, dependencies, etc.)",
        report_copy.skipped_count()
    );
    if report_copy.error_count() > 0 {
        println!("[ERR] {} files failed to copy", report_copy.error_count());
    }
    if if_dry_run {
        return;
    }
    println!();
    println!("Next Steps:");
    println!("1. Read the comprehensive guide: README_TEMPLATE.md");
    println!("2. Run project analysis: /analyze-existing-project");
    println!("3. Extract project context: /extract-project-context");
    println!("4. Generate migration strategy: /generate-migration-strategy");
    println!("5. Execute migration phases incrementally");
    println!();
    println!("Your existing codebase has been preserved completely.");
}
