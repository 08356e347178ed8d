use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use templkit_io_fs::{EnumCopySymlinkStrategy, SpecCopyOptions, SpecIgnorePatterns, SpecRunOptions};

#[derive(Debug, Clone, Parser)]
#[command(name = "templkit-copy", version)]
#[command(about = "Copy the project migration template into an existing project directory")]
pub struct CliArgs {
    /// Existing project directory the template is copied into
    pub target_directory: PathBuf,

    #[arg(long, help = "Overwrite existing files without prompting")]
    pub force: bool,

    /// Template directory; defaults to the directory holding this executable
    #[arg(long, env = "TEMPLKIT_SOURCE", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Extra literal ignore pattern (substring/suffix match); repeatable
    #[arg(long = "exclude", value_name = "PATTERN")]
    pub patterns_exclude: Vec<String>,

    /// Extra glob ignore pattern matched against the relative path; repeatable
    #[arg(long = "exclude-glob", value_name = "GLOB")]
    pub patterns_exclude_glob: Vec<String>,

    #[arg(long, help = "Skip symlinks instead of copying what they point to")]
    pub skip_symlinks: bool,

    #[arg(long, help = "Show what would be copied without writing anything")]
    pub dry_run: bool,

    #[arg(long, help = "Classify markdown documents in the target after copying")]
    pub scan: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// Resolve the template directory and the copier's own file name, which is
    /// always excluded from the copy.
    fn resolve_source(&self) -> Result<(PathBuf, String)> {
        let path_exe =
            std::env::current_exe().context("Failed to locate the running executable")?;
        let name_self = path_exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dir_source = match &self.source {
            Some(dir) => dir.clone(),
            None => path_exe
                .parent()
                .map(PathBuf::from)
                .context("Executable has no parent directory")?,
        };
        Ok((dir_source, name_self))
    }

    pub fn to_run_options(&self) -> Result<SpecRunOptions> {
        let (dir_source, name_self) = self.resolve_source()?;

        let mut patterns_ignore = SpecIgnorePatterns::for_template(&name_self);
        for pattern in &self.patterns_exclude {
            patterns_ignore.push_literal(pattern.as_str());
        }
        for pattern in &self.patterns_exclude_glob {
            patterns_ignore.push_glob(pattern.as_str());
        }

        let rule_symlink = if self.skip_symlinks {
            EnumCopySymlinkStrategy::SkipSymlinks
        } else {
            EnumCopySymlinkStrategy::Dereference
        };

        Ok(SpecRunOptions {
            dir_source,
            dir_target: self.target_directory.clone(),
            if_force: self.force,
            spec_cp_options: SpecCopyOptions {
                patterns_ignore,
                rule_symlink,
                if_dry_run: self.dry_run,
            },
        })
    }
}
