//! Template source descriptors for the debug store.
//!
//! A [`TemplateSource`] records where debug-mode templates come from: an
//! explicit ordered file list, or a glob pattern resolved against the
//! filesystem at load time. Loading compiles a fresh [`TemplateSet`] so
//! edits to template files are observed without restarting the process.

use std::path::PathBuf;

use tracing::debug;

use crate::error::RenderError;
use crate::set::TemplateSet;

/// Where a debug store's templates come from.
///
/// Exactly one source kind is carried per store. Construction through
/// [`DebugStore`](crate::DebugStore) validates that the source is non-empty;
/// an empty file list or empty glob pattern is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// An explicit, ordered list of template files.
    Files(Vec<PathBuf>),
    /// A glob pattern resolved against the filesystem on every load.
    Glob(String),
}

impl TemplateSource {
    /// Checks the source is usable, without touching the filesystem.
    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        match self {
            TemplateSource::Files(files) if files.is_empty() => Err(RenderError::Config(
                "debug store requires at least one template file".to_string(),
            )),
            TemplateSource::Glob(pattern) if pattern.is_empty() => Err(RenderError::Config(
                "debug store requires a non-empty glob pattern".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Compiles a fresh template set from the current filesystem state.
    pub fn load(&self) -> Result<TemplateSet, RenderError> {
        match self {
            TemplateSource::Files(files) => {
                debug!(files = files.len(), "recompiling template set from file list");
                TemplateSet::from_files(files)
            }
            TemplateSource::Glob(pattern) => {
                let set = TemplateSet::from_glob(pattern)?;
                debug!(
                    pattern = pattern.as_str(),
                    templates = set.template_names().count(),
                    "recompiled template set from glob"
                );
                Ok(set)
            }
        }
    }
}
