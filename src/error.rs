use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::i18n::I18n;

/// Failure kinds of the template switcher.
///
/// Only `MissingSourceTemplate`, `MissingPrimaryTarget` and `Cancelled` end the
/// run; the others are recovered from (re-prompt) or reported as warnings.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("source template not found: {}", .0.display())]
    MissingSourceTemplate(PathBuf),

    #[error("no {primary} or {wip} found in {}", .dir.display())]
    MissingPrimaryTarget {
        dir: PathBuf,
        primary: String,
        wip: String,
    },

    #[error("path cannot be empty")]
    EmptyPathInput,

    #[error("could not create directory {}: {source}", .path.display())]
    DirectoryCreationFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no MEMORY_PATH definition found in {}", .0.display())]
    PlaceholderNotFound(PathBuf),

    #[error("could not write mirror {}: {source}", .path.display())]
    MirrorWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl SetupError {
    /// Localized one-line description for console output.
    pub fn localized(&self, i18n: &I18n) -> String {
        match self {
            Self::MissingSourceTemplate(path) => i18n.err_template_missing(&file_name(path)),
            Self::MissingPrimaryTarget { primary, .. } => i18n.err_primary_missing(primary),
            Self::EmptyPathInput => i18n.err_path_empty().to_string(),
            Self::DirectoryCreationFailure { source, .. } => {
                i18n.memory_create_error(&source.to_string())
            }
            Self::PlaceholderNotFound(path) => i18n.file_warning_no_memory_path(&file_name(path)),
            Self::MirrorWriteFailure { path, source } => {
                i18n.lang_switch_mirror_warning(&file_name(path), &source.to_string())
            }
            Self::Cancelled => i18n.err_cancelled().to_string(),
        }
    }
}

/// Whether `err` is a user cancellation.
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<SetupError>(), Some(SetupError::Cancelled))
}

pub(crate) fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
