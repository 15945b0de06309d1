//! Recursive conversion of a document tree
//!
//! Every regular file under the start directory whose extension matches
//! `from_ext` is converted through the client and written next to the source
//! with `to_ext`. A failed file is reported and the walk moves on, unless
//! [`WalkOptions::fail_fast`] is set.

pub mod filter;
pub mod path_mapping;

use crate::client::ConversionClient;
use crate::config::ConversionConfig;
use crate::error::{FileError, WalkError};
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Options controlling a walk
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Stop at the first file that fails to convert
    pub fail_fast: bool,
}

/// Outcome of one file, reported as the walk progresses
#[derive(Debug)]
pub enum FileOutcome<'a> {
    Converted { source: &'a Path, target: &'a Path },
    Failed { source: &'a Path, error: &'a FileError },
}

/// Files converted and failed during a walk
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WalkReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl WalkReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Walk `start` and convert every `from_ext` file to `to_ext`
pub fn walk(
    client: &ConversionClient,
    start: &Path,
    from_ext: &str,
    to_ext: &str,
    options: &WalkOptions,
) -> Result<WalkReport, WalkError> {
    walk_with(client, start, from_ext, to_ext, options, |_| {})
}

/// Like [`walk`], calling `on_file` after each file is handled
pub fn walk_with<F>(
    client: &ConversionClient,
    start: &Path,
    from_ext: &str,
    to_ext: &str,
    options: &WalkOptions,
    mut on_file: F,
) -> Result<WalkReport, WalkError>
where
    F: FnMut(&FileOutcome<'_>),
{
    if !start.is_dir() {
        return Err(WalkError::NotADirectory(start.to_path_buf()));
    }
    let config = resolve_doc_types(client.config(), from_ext, to_ext);
    let mut report = WalkReport::default();

    for entry in WalkDir::new(start).sort_by_file_name() {
        let result = match entry {
            Ok(entry) if filter::has_extension(entry.path(), from_ext) => {
                let source = entry.into_path();
                let target = path_mapping::map_source_to_target(&source, to_ext);
                convert_file(client, &config, &source, &target)
                    .map(|()| (source.clone(), target))
                    .map_err(|error| (source, error))
            }
            Ok(_) => continue,
            Err(err) => {
                let source = err.path().unwrap_or(start).to_path_buf();
                Err((source, FileError::Traverse(err)))
            }
        };

        match result {
            Ok((source, target)) => {
                tracing::info!(source = %source.display(), target = %target.display(), "converted");
                on_file(&FileOutcome::Converted {
                    source: &source,
                    target: &target,
                });
                report.converted.push(target);
            }
            Err((source, error)) => {
                tracing::error!(source = %source.display(), %error, "conversion failed");
                on_file(&FileOutcome::Failed {
                    source: &source,
                    error: &error,
                });
                if options.fail_fast {
                    return Err(WalkError::File {
                        path: source,
                        source: error,
                    });
                }
                report.failed.push(source);
            }
        }
    }

    if !report.failed.is_empty() {
        return Err(WalkError::Failures {
            failed: report.failed.len(),
            total: report.total(),
        });
    }
    Ok(report)
}

fn convert_file(
    client: &ConversionClient,
    config: &ConversionConfig,
    source: &Path,
    target: &Path,
) -> Result<(), FileError> {
    let input = File::open(source)?;
    let html = client.convert_with(config, input, "text/plain")?;
    std::fs::write(target, html)?;
    Ok(())
}

/// Fill in `from` and `to` from the extension map when the config leaves them unset
fn resolve_doc_types<'a>(
    config: &'a ConversionConfig,
    from_ext: &str,
    to_ext: &str,
) -> Cow<'a, ConversionConfig> {
    if config.from.is_some() && config.to.is_some() {
        return Cow::Borrowed(config);
    }
    let mut resolved = config.clone();
    if resolved.from.is_none() {
        resolved.from = config.doc_type_for(from_ext).map(str::to_string);
    }
    if resolved.to.is_none() {
        resolved.to = config.doc_type_for(to_ext).map(str::to_string);
    }
    Cow::Owned(resolved)
}
