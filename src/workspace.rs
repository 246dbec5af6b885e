//! File-level operations on a template directory.
//!
//! A [`Workspace`] is the directory holding the two language templates, the
//! primary target (or its work-in-progress variant) and the mirror target.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::FilesConfig;
use crate::detect::{self, DocLanguage};
use crate::error::SetupError;
use crate::i18n::{I18n, Lang};
use crate::substitute;

const BACKUP_SUFFIX: &str = ".backup";
const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    files: FilesConfig,
}

/// What happened to the mirror target.
#[derive(Debug)]
pub enum MirrorStatus {
    Created,
    Updated,
    /// The mirror exists but has nothing to substitute.
    NotUpdated(SetupError),
    Failed(SetupError),
}

impl MirrorStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }
}

#[derive(Debug)]
pub struct SwitchReport {
    pub target: Lang,
    /// Language of the primary target before the switch.
    pub previous: DocLanguage,
    /// Document the configured path was read from, if any existed.
    pub source: Option<PathBuf>,
    pub preserved: Option<String>,
    pub backups: Vec<PathBuf>,
    pub primary: PathBuf,
    pub mirror_path: PathBuf,
    pub mirror: MirrorStatus,
}

#[derive(Debug)]
pub struct UpdateReport {
    pub primary: PathBuf,
    pub placeholders: usize,
    pub field: bool,
    pub mirror_path: PathBuf,
    /// `None` when the mirror was absent and nothing was written to the primary.
    pub mirror: Option<MirrorStatus>,
}

impl UpdateReport {
    pub fn primary_updated(&self) -> bool {
        self.placeholders > 0 || self.field
    }
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>, files: FilesConfig) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &FilesConfig {
        &self.files
    }

    pub fn template_path(&self, lang: Lang) -> PathBuf {
        match lang {
            Lang::En => self.dir.join(&self.files.template_en),
            Lang::Ja => self.dir.join(&self.files.template_ja),
        }
    }

    pub fn primary_path(&self) -> PathBuf {
        self.dir.join(&self.files.primary)
    }

    pub fn wip_path(&self) -> PathBuf {
        self.dir.join(&self.files.wip)
    }

    pub fn mirror_path(&self) -> PathBuf {
        self.dir.join(&self.files.mirror)
    }

    /// Every configured document keyed by its config name.
    pub fn documents(&self) -> [(&'static str, PathBuf); 5] {
        [
            ("template_en", self.template_path(Lang::En)),
            ("template_ja", self.template_path(Lang::Ja)),
            ("primary", self.primary_path()),
            ("wip", self.wip_path()),
            ("mirror", self.mirror_path()),
        ]
    }

    pub fn backup_path(target: &Path) -> PathBuf {
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(BACKUP_SUFFIX);
        target.with_file_name(name)
    }

    /// Existing primary target, falling back to the work-in-progress file.
    pub fn locate_primary(&self) -> Result<PathBuf, SetupError> {
        self.existing_document().ok_or_else(|| SetupError::MissingPrimaryTarget {
            dir: self.dir.clone(),
            primary: self.files.primary.clone(),
            wip: self.files.wip.clone(),
        })
    }

    fn existing_document(&self) -> Option<PathBuf> {
        [self.primary_path(), self.wip_path()]
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Language of the located document; `Absent` when there is none.
    pub fn current_language(&self) -> DocLanguage {
        match self.existing_document() {
            Some(path) => detect::detect_language(&path),
            None => DocLanguage::Absent,
        }
    }

    /// Copy the `target` template over the primary target and mirror it.
    ///
    /// A configured memory path found in the current document is carried
    /// into the new content. The primary and mirror are backed up first
    /// when the primary is in a different (or unrecognised) language.
    pub fn switch_language(&self, i18n: &I18n, target: Lang) -> Result<SwitchReport> {
        let template_path = self.template_path(target);
        if !template_path.is_file() {
            return Err(SetupError::MissingSourceTemplate(template_path).into());
        }
        let template = fs::read_to_string(&template_path)
            .context(i18n.err_read_file(&template_path.display().to_string()))?;
        debug!(template = %template_path.display(), "read template");

        let primary = self.primary_path();
        let previous = detect::detect_language(&primary);

        let source = self.existing_document();
        let preserved = source.as_deref().and_then(read_configured_path);

        let content = match &preserved {
            Some(path) => {
                info!(path, "preserving configured memory path");
                substitute::substitute(&template, path).content
            }
            None => template,
        };

        let backups = if previous.differs_from(target) {
            self.backup_targets()
        } else {
            Vec::new()
        };

        write_atomic(&primary, &content)
            .context(i18n.err_write_file(&primary.display().to_string()))?;
        info!(path = %primary.display(), lang = %target, "wrote primary target");

        let mirror = self.write_mirror(&content);

        Ok(SwitchReport {
            target,
            previous,
            source,
            preserved,
            backups,
            primary,
            mirror_path: self.mirror_path(),
            mirror,
        })
    }

    fn backup_targets(&self) -> Vec<PathBuf> {
        [self.primary_path(), self.mirror_path()]
            .into_iter()
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let backup = Self::backup_path(&path);
                match fs::copy(&path, &backup) {
                    Ok(_) => {
                        info!(from = %path.display(), to = %backup.display(), "backed up target");
                        Some(backup)
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "backup failed");
                        None
                    }
                }
            })
            .collect()
    }

    fn write_mirror(&self, content: &str) -> MirrorStatus {
        let mirror = self.mirror_path();
        let existed = mirror.exists();
        match write_atomic(&mirror, content) {
            Ok(()) if existed => MirrorStatus::Updated,
            Ok(()) => MirrorStatus::Created,
            Err(source) => {
                warn!(path = %mirror.display(), error = %source, "mirror write failed");
                MirrorStatus::Failed(SetupError::MirrorWriteFailure {
                    path: mirror,
                    source,
                })
            }
        }
    }

    /// Substitute `memory_path` into the primary target and the mirror.
    ///
    /// A primary without any MEMORY_PATH definition is left untouched and
    /// reported through [`UpdateReport::primary_updated`]. An absent mirror
    /// is created from the updated primary.
    pub fn update_memory_path(&self, i18n: &I18n, memory_path: &str) -> Result<UpdateReport> {
        let primary = self.primary_path();
        let original = fs::read_to_string(&primary)
            .context(i18n.err_read_file(&primary.display().to_string()))?;

        let result = substitute::substitute(&original, memory_path);
        if result.found() {
            if result.content != original {
                write_atomic(&primary, &result.content)
                    .context(i18n.err_write_file(&primary.display().to_string()))?;
            }
            info!(
                path = %primary.display(),
                placeholders = result.placeholders,
                field = result.field,
                "updated memory path"
            );
        } else {
            warn!(path = %primary.display(), "no MEMORY_PATH definition found");
        }

        let mirror_path = self.mirror_path();
        let mirror = if mirror_path.exists() {
            Some(self.update_mirror(&mirror_path, memory_path))
        } else if result.found() {
            Some(self.write_mirror(&result.content))
        } else {
            None
        };

        Ok(UpdateReport {
            primary,
            placeholders: result.placeholders,
            field: result.field,
            mirror_path,
            mirror,
        })
    }

    fn update_mirror(&self, path: &Path, memory_path: &str) -> MirrorStatus {
        let original = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) => {
                warn!(path = %path.display(), error = %source, "cannot read mirror");
                return MirrorStatus::Failed(SetupError::MirrorWriteFailure {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let result = substitute::substitute(&original, memory_path);
        if !result.found() {
            return MirrorStatus::NotUpdated(SetupError::PlaceholderNotFound(path.to_path_buf()));
        }
        if result.content == original {
            return MirrorStatus::Updated;
        }
        match write_atomic(path, &result.content) {
            Ok(()) => MirrorStatus::Updated,
            Err(source) => MirrorStatus::Failed(SetupError::MirrorWriteFailure {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn read_configured_path(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let found = substitute::extract_configured_path(&text);
            debug!(path = %path.display(), ?found, "extracted configured memory path");
            found
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read document for path extraction");
            None
        }
    }
}

/// Replace `path` with `contents` through a temporary file in the same
/// directory. Permissions of an existing file are kept, and a symlink is
/// written through to its target instead of being replaced.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let resolved = resolve_symlink(path)?;
    let path = resolved.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Final target of `path` when it is a symlink; `path` itself otherwise.
/// Dangling links resolve to the file they would create.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    for _ in 0..MAX_LINK_DEPTH {
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let target = fs::read_link(&current)?;
                current = match current.parent() {
                    Some(parent) if target.is_relative() => parent.join(target),
                    _ => target,
                };
            }
            _ => return Ok(current),
        }
    }
    Err(io::Error::other(format!(
        "too many levels of symbolic links: {}",
        path.display()
    )))
}
