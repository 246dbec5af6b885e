//! Handlers for the non-interactive subcommands of `agents-md-setup`.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::{ConfigAction, ConfigArgs, SetupCli, Shell};
use crate::config::{self, Config};
use crate::detect::{self, DocLanguage};
use crate::i18n::I18n;
use crate::workspace::Workspace;

fn completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

pub fn generate_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = SetupCli::command();
    let bin = cmd.get_name().to_string();
    generate(completion_shell(shell), &mut cmd, bin, out);
}

/// Run a `config` action. `dir` is the `--dir` flag, used by `config files`.
pub fn handle_config(
    i18n: &I18n,
    args: ConfigArgs,
    dir: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    match args.action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| anyhow::anyhow!("{}", i18n.config_key_not_found(&key)))?;
            writeln!(out, "{value}")?;
        }

        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            if !config.set(i18n, &key, &value)? {
                anyhow::bail!("{}", i18n.config_key_not_found(&key));
            }
            config.save(i18n)?;
            writeln!(out, "{}", i18n.config_updated(&key, value.trim()))?;
        }

        ConfigAction::List => {
            for (key, value) in Config::load()?.list() {
                writeln!(out, "{key} = {value}")?;
            }
        }

        ConfigAction::Reset => {
            Config::reset(i18n)?;
            writeln!(out, "{}", i18n.config_reset_done())?;
        }

        ConfigAction::Path => {
            writeln!(out, "{}", config::config_path()?.display())?;
        }

        ConfigAction::Files => {
            let config = Config::load()?;
            let dir = match dir {
                Some(dir) => dir.to_path_buf(),
                None => env::current_dir().context(i18n.err_current_dir())?,
            };
            let workspace = Workspace::new(dir, config.files);
            for (key, path) in workspace.documents() {
                write!(out, "{key} = {}", path.display())?;
                if let Ok(target) = fs::read_link(&path) {
                    write!(out, " -> {}", target.display())?;
                }
                writeln!(out, " [{}]", document_state(i18n, &path))?;
            }
        }
    }

    Ok(())
}

fn document_state(i18n: &I18n, path: &Path) -> String {
    match detect::detect_language(path) {
        DocLanguage::Absent => i18n.config_file_missing().to_string(),
        DocLanguage::Unknown => i18n.config_file_unrecognized().to_string(),
        known => known.display_code().to_lowercase(),
    }
}

/// Extract --lang argument from command line args before full parsing.
///
/// Help text is localized before clap sees the arguments, so the language
/// has to be known up front. `--lang` is global and may appear anywhere.
pub fn extract_lang_arg(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--lang" {
            return args.get(i + 1).cloned();
        }
        if let Some(lang) = arg.strip_prefix("--lang=") {
            return Some(lang.to_string());
        }
    }
    None
}
