use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub const TEMPLATE_EN: &str = include_str!("../tests/fixtures/AGENTS.md.en");
pub const TEMPLATE_JA: &str = include_str!("../tests/fixtures/AGENTS.md.ja");

/// Global lock for tests that mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

pub struct EnvVarGuard {
    key: String,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: impl AsRef<OsStr>) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self {
            key: key.to_string(),
            prev,
        }
    }

    pub fn remove(key: &str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self {
            key: key.to_string(),
            prev,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(&self.key, v),
            None => std::env::remove_var(&self.key),
        }
    }
}

/// Populate `dir` with both templates under their default names.
pub fn write_templates(dir: &Path) -> std::io::Result<()> {
    fs::write(dir.join("AGENTS.md.en"), TEMPLATE_EN)?;
    fs::write(dir.join("AGENTS.md.ja"), TEMPLATE_JA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_guard_restores_previous_value() {
        let _lock = env_lock();

        std::env::remove_var("AGENTS_MD_TEST_ENV");
        {
            let _g = EnvVarGuard::set("AGENTS_MD_TEST_ENV", "value1");
            assert_eq!(std::env::var("AGENTS_MD_TEST_ENV").unwrap(), "value1");
        }
        assert!(std::env::var("AGENTS_MD_TEST_ENV").is_err());

        std::env::set_var("AGENTS_MD_TEST_ENV", "prev");
        {
            let _g = EnvVarGuard::remove("AGENTS_MD_TEST_ENV");
            assert!(std::env::var("AGENTS_MD_TEST_ENV").is_err());
        }
        assert_eq!(std::env::var("AGENTS_MD_TEST_ENV").unwrap(), "prev");
    }

    #[test]
    fn write_templates_creates_both_files() {
        let dir = tempfile::TempDir::new().unwrap();
        write_templates(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("AGENTS.md.ja")).unwrap(),
            TEMPLATE_JA
        );
        assert!(dir.path().join("AGENTS.md.en").is_file());
    }

    #[test]
    fn write_templates_errors_when_dir_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(write_templates(&dir.path().join("missing")).is_err());
    }
}
