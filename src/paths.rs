//! Normalization of user-typed memory paths.
//!
//! Steps, in order: strip one layer of matching quotes, undo shell escaping,
//! expand `~`, expand environment variables, make absolute.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::config::home_dir;
use crate::error::SetupError;

#[cfg(not(windows))]
static RE_ENV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?:\{([^}]+)\}|([A-Za-z0-9_]+))").unwrap());

#[cfg(windows)]
static RE_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([^}]+)\}|([A-Za-z0-9_]+))|%([^%]+)%").unwrap()
});

/// Normalize raw input into an absolute path, relative to `cwd`.
pub fn normalize_input(raw: &str, cwd: &Path) -> Result<PathBuf, SetupError> {
    let unquoted = strip_quotes(raw.trim());
    if unquoted.trim().is_empty() {
        return Err(SetupError::EmptyPathInput);
    }

    let decoded = decode_shell_escapes(unquoted);
    let expanded = expand_env_vars(&expand_tilde(&decoded));
    let resolved = resolve(Path::new(&expanded), cwd);
    debug!(raw, resolved = %resolved.display(), "normalized memory path");
    Ok(resolved)
}

/// Remove one layer of matching surrounding quotes.
pub fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Undo backslash-space escapes and collapse doubled backslashes.
pub fn decode_shell_escapes(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    s.replace("\\ ", " ").replace("\\\\", "\\")
}

/// Expand a leading `~` to the home directory.
///
/// Input is returned unchanged when the home directory is unknown.
pub fn expand_tilde(s: &str) -> String {
    let rest = match s.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return s.to_string(),
    };

    match home_dir() {
        Ok(home) => format!("{}{rest}", home.display()),
        Err(err) => {
            warn!(error = %err, "cannot expand ~ without a home directory");
            s.to_string()
        }
    }
}

/// Expand `$NAME` and `${NAME}` (and `%NAME%` on Windows).
///
/// Unset variables are left untouched.
pub fn expand_env_vars(s: &str) -> String {
    if !s.contains('$') && !(cfg!(windows) && s.contains('%')) {
        return s.to_string();
    }

    RE_ENV
        .replace_all(s, |caps: &Captures<'_>| {
            let name = caps
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| m.as_str())
                .unwrap_or_default();
            env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Make `path` absolute against `cwd`.
///
/// Existing paths are canonicalized; paths that do not exist yet are
/// normalized lexically.
pub fn resolve(path: &Path, cwd: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    match fs::canonicalize(&absolute) {
        Ok(canonical) => strip_verbatim(canonical),
        Err(_) => normalize_lexically(&absolute),
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(windows)]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    let raw = path.display().to_string();
    match raw.strip_prefix(r"\\?\") {
        Some(rest) if !rest.starts_with("UNC") => PathBuf::from(rest),
        _ => path,
    }
}

#[cfg(not(windows))]
fn strip_verbatim(path: PathBuf) -> PathBuf {
    path
}

/// Create `path` and its parents (`mkdir -p`).
pub fn create_directory(path: &Path) -> Result<(), SetupError> {
    fs::create_dir_all(path).map_err(|source| SetupError::DirectoryCreationFailure {
        path: path.to_path_buf(),
        source,
    })
}
