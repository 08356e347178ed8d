//! Template tree traversal and copy orchestration.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ignore::SpecIgnoreMatcher;
use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{CopyTreeError, EnumCopySymlinkStrategy, SpecCopyOptions};
use crate::util::{
    copy_file_with_metadata, derive_destination_path, is_destination_inside_source,
    validate_destination_path_safety,
};

#[derive(Debug, Clone)]
struct SpecWalkEntry {
    path_src: PathBuf,
    name: String,
    if_is_symlink: bool,
}

#[derive(Debug)]
struct SpecCopyContext {
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
    spec_cp_options: SpecCopyOptions,
    matcher_ignore: SpecIgnoreMatcher,
    builder_cp_report: ReportCopyBuilder,
    set_ancestor_dirs: HashSet<(u64, u64)>,
}

/// Copy the template tree at `dir_source` into `dir_destination`.
///
/// Every file under the source is classified exactly once:
/// - ignored by [`SpecCopyOptions::patterns_ignore`] → `skipped`,
/// - copied to the mirrored relative path (with `README.md` written as
///   `README_TEMPLATE.md`) → `copied`,
/// - failed to copy → `skipped` plus an entry in `errors`.
///
/// Directory entries are visited in name order, so the report is stable for a
/// given tree. Existing destination files are overwritten.
///
/// Returns [`CopyTreeError`] only for setup failures: invalid patterns, a source
/// that is not a directory, a destination inside the source, or a destination
/// root that cannot be created or is a symlink.
pub fn copy_tree<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy, CopyTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    if !path_dir_src.is_dir() {
        return Err(CopyTreeError::SourceNotDirectory(path_dir_src));
    }
    if is_destination_inside_source(&path_dir_src, &path_dir_dst) {
        return Err(CopyTreeError::SourceDestinationOverlap {
            path_src: path_dir_src,
            path_dst: path_dir_dst,
        });
    }
    let matcher_ignore = SpecIgnoreMatcher::compile(&spec_cp_options.patterns_ignore)?;

    if !spec_cp_options.if_dry_run {
        fs::create_dir_all(&path_dir_dst).map_err(|e| CopyTreeError::DestinationInitFailed {
            path: path_dir_dst.clone(),
            message: e.to_string(),
        })?;
    }
    match fs::symlink_metadata(&path_dir_dst) {
        Ok(meta_dir_dst) if meta_dir_dst.file_type().is_symlink() => {
            return Err(CopyTreeError::DestinationInitFailed {
                path: path_dir_dst,
                message: "Destination root path must not be a symbolic link.".to_string(),
            });
        }
        Ok(_) => {}
        Err(_) if spec_cp_options.if_dry_run => {}
        Err(e) => {
            return Err(CopyTreeError::DestinationInitFailed {
                path: path_dir_dst,
                message: e.to_string(),
            });
        }
    }

    tracing::debug!(
        source = %path_dir_src.display(),
        destination = %path_dir_dst.display(),
        dry_run = spec_cp_options.if_dry_run,
        "copy tree start"
    );

    let mut spec_cp_ctx = SpecCopyContext {
        path_dir_src: path_dir_src.clone(),
        path_dir_dst,
        spec_cp_options,
        matcher_ignore,
        builder_cp_report: ReportCopyBuilder::default(),
        set_ancestor_dirs: HashSet::new(),
    };

    walk_directory(&path_dir_src, &mut spec_cp_ctx);
    Ok(spec_cp_ctx.builder_cp_report.build())
}

fn relative_to_source(path_src: &Path, spec_cp_ctx: &SpecCopyContext) -> PathBuf {
    path_src
        .strip_prefix(&spec_cp_ctx.path_dir_src)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path_src.to_path_buf())
}

fn walk_directory(path_root: &Path, spec_cp_ctx: &mut SpecCopyContext) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        // Only directories on the current path count; a sibling alias of an
        // already visited directory is walked again under its own name.
        let key_dir = match fs::metadata(path_root) {
            Ok(stat_root) => (stat_root.dev(), stat_root.ino()),
            Err(e) => {
                spec_cp_ctx.builder_cp_report.add_warning(format!(
                    "Failed to stat directory {} ({e})",
                    path_root.display()
                ));
                return;
            }
        };
        if !spec_cp_ctx.set_ancestor_dirs.insert(key_dir) {
            let c_warning = format!("Symlink loop detected: {}", path_root.display());
            tracing::warn!("{c_warning}");
            spec_cp_ctx.builder_cp_report.add_warning(c_warning);
            return;
        }
        walk_directory_entries(path_root, spec_cp_ctx);
        spec_cp_ctx.set_ancestor_dirs.remove(&key_dir);
    }

    #[cfg(not(unix))]
    walk_directory_entries(path_root, spec_cp_ctx);
}

fn walk_directory_entries(path_root: &Path, spec_cp_ctx: &mut SpecCopyContext) {
    let iter_entries = match fs::read_dir(path_root) {
        Ok(iter) => iter,
        Err(e) => {
            let c_warning = format!("Failed to read directory {} ({e})", path_root.display());
            tracing::warn!("{c_warning}");
            spec_cp_ctx.builder_cp_report.add_warning(c_warning);
            return;
        }
    };

    let mut l_dirs: Vec<SpecWalkEntry> = Vec::new();
    let mut l_files: Vec<SpecWalkEntry> = Vec::new();

    for entry_res in iter_entries {
        let entry = match entry_res {
            Ok(v) => v,
            Err(e) => {
                spec_cp_ctx.builder_cp_report.add_warning(format!(
                    "Failed to read directory entry under {} ({e})",
                    path_root.display()
                ));
                continue;
            }
        };

        let path_entry = entry.path();
        let cfg_file_type = match entry.file_type() {
            Ok(v) => v,
            Err(e) => {
                let path_rel = relative_to_source(&path_entry, spec_cp_ctx);
                spec_cp_ctx.builder_cp_report.add_error(
                    path_rel,
                    format!("Failed to inspect {} ({e})", path_entry.display()),
                );
                continue;
            }
        };

        let b_is_symlink = cfg_file_type.is_symlink();
        let spec_entry = SpecWalkEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path_src: path_entry,
            if_is_symlink: b_is_symlink,
        };
        if cfg_file_type.is_dir() || (b_is_symlink && spec_entry.path_src.is_dir()) {
            l_dirs.push(spec_entry);
        } else {
            l_files.push(spec_entry);
        }
    }

    l_dirs.sort_by(|a, b| a.name.cmp(&b.name));
    l_files.sort_by(|a, b| a.name.cmp(&b.name));

    for spec_dir_entry in l_dirs {
        if spec_dir_entry.if_is_symlink
            && spec_cp_ctx.spec_cp_options.rule_symlink == EnumCopySymlinkStrategy::SkipSymlinks
        {
            let path_rel = relative_to_source(&spec_dir_entry.path_src, spec_cp_ctx);
            tracing::debug!(path = %path_rel.display(), "skip symlinked directory");
            spec_cp_ctx.builder_cp_report.add_skipped(path_rel);
            continue;
        }
        walk_directory(&spec_dir_entry.path_src, spec_cp_ctx);
    }

    for spec_file_entry in l_files {
        handle_file_entry(spec_file_entry, spec_cp_ctx);
    }
}

fn handle_file_entry(spec_file_entry: SpecWalkEntry, spec_cp_ctx: &mut SpecCopyContext) {
    let path_rel = relative_to_source(&spec_file_entry.path_src, spec_cp_ctx);

    if let Some(pattern) = spec_cp_ctx.matcher_ignore.find_match(&path_rel) {
        tracing::debug!(path = %path_rel.display(), pattern, "ignored");
        spec_cp_ctx.builder_cp_report.add_skipped(path_rel);
        return;
    }

    if spec_file_entry.if_is_symlink
        && spec_cp_ctx.spec_cp_options.rule_symlink == EnumCopySymlinkStrategy::SkipSymlinks
    {
        tracing::debug!(path = %path_rel.display(), "skip symlink");
        spec_cp_ctx.builder_cp_report.add_skipped(path_rel);
        return;
    }

    // Follows symlinks, so a dangling link surfaces here as NotFound.
    let meta_file_src = match fs::metadata(&spec_file_entry.path_src) {
        Ok(v) => v,
        Err(e) => {
            let c_message = if spec_file_entry.if_is_symlink {
                format!("Broken symlink: {} ({e})", spec_file_entry.path_src.display())
            } else {
                e.to_string()
            };
            record_failure(path_rel, c_message, spec_cp_ctx);
            return;
        }
    };
    if !meta_file_src.is_file() {
        spec_cp_ctx.builder_cp_report.add_warning(format!(
            "Special file skipped: {}",
            spec_file_entry.path_src.display()
        ));
        spec_cp_ctx.builder_cp_report.add_skipped(path_rel);
        return;
    }

    let path_file_dst = derive_destination_path(&path_rel, &spec_cp_ctx.path_dir_dst);

    if spec_cp_ctx.spec_cp_options.if_dry_run {
        tracing::info!(path = %path_rel.display(), "would copy");
        spec_cp_ctx.builder_cp_report.add_copied(path_rel);
        return;
    }

    if let Err(message) =
        validate_destination_path_safety(&path_file_dst, &spec_cp_ctx.path_dir_dst)
    {
        record_failure(path_rel, message, spec_cp_ctx);
        return;
    }

    if let Some(path_parent_dst) = path_file_dst.parent()
        && let Err(e) = fs::create_dir_all(path_parent_dst)
    {
        record_failure(
            path_rel,
            format!("Failed to create {} ({e})", path_parent_dst.display()),
            spec_cp_ctx,
        );
        return;
    }

    match copy_file_with_metadata(&spec_file_entry.path_src, &path_file_dst) {
        Ok(()) => {
            tracing::info!(path = %path_rel.display(), "copied");
            spec_cp_ctx.builder_cp_report.add_copied(path_rel);
        }
        Err(e) => record_failure(path_rel, e.to_string(), spec_cp_ctx),
    }
}

fn record_failure(path_rel: PathBuf, message: String, spec_cp_ctx: &mut SpecCopyContext) {
    tracing::warn!(path = %path_rel.display(), error = %message, "copy failed");
    spec_cp_ctx.builder_cp_report.add_error(path_rel, message);
}
