//! Interactive setup: pick a template language, switch the targets, then
//! configure MEMORY_PATH in both of them.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::detect::DocLanguage;
use crate::error::{file_name, SetupError};
use crate::i18n::{self, I18n, Lang};
use crate::interrupt;
use crate::paths;
use crate::prompt::Console;
use crate::workspace::{MirrorStatus, SwitchReport, UpdateReport, Workspace};

const EXAMPLE_PATHS: [&str; 4] = [
    "~/Documents/AI-Memory",
    "/Users/username/Library/CloudStorage/GoogleDrive-your@email.com/My Drive/AI-Memory",
    "~/Dropbox/AI-Memory",
    r"C:\Users\username\Documents\AI-Memory",
];

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Directory holding templates and targets.
    pub dir: PathBuf,
    /// Base for relative memory paths.
    pub cwd: PathBuf,
    pub lang: Option<String>,
    pub memory_path: Option<String>,
    pub assume_yes: bool,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Language switched and MEMORY_PATH configured.
    Configured,
    /// Language switched; the user stopped before path configuration.
    LanguageOnly,
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Configured | Self::LanguageOnly => ExitCode::SUCCESS,
            Self::Failed => ExitCode::from(1),
        }
    }
}

/// Machine-readable result printed with `--json`.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub language: String,
    pub previous_language: String,
    pub memory_path: Option<String>,
    pub preserved_path: Option<String>,
    pub primary: String,
    pub primary_updated: bool,
    pub placeholders_replaced: usize,
    pub mirror: String,
    pub mirror_status: Option<&'static str>,
    pub backups: Vec<String>,
}

impl Summary {
    fn new(switch: &SwitchReport, update: Option<(&UpdateReport, &str)>) -> Self {
        let mirror_status = match update {
            Some((update, _)) => update.mirror.as_ref().map(status_label),
            None => Some(status_label(&switch.mirror)),
        };
        Self {
            language: switch.target.code().to_string(),
            previous_language: switch.previous.display_code().to_lowercase(),
            memory_path: update.map(|(_, path)| path.to_string()),
            preserved_path: switch.preserved.clone(),
            primary: switch.primary.display().to_string(),
            primary_updated: update.is_some_and(|(update, _)| update.primary_updated()),
            placeholders_replaced: update.map_or(0, |(update, _)| update.placeholders),
            mirror: switch.mirror_path.display().to_string(),
            mirror_status,
            backups: switch
                .backups
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }
}

fn status_label(status: &MirrorStatus) -> &'static str {
    match status {
        MirrorStatus::Created => "created",
        MirrorStatus::Updated => "updated",
        MirrorStatus::NotUpdated(_) => "not_updated",
        MirrorStatus::Failed(_) => "failed",
    }
}

pub struct SetupFlow<'a> {
    workspace: Workspace,
    console: Console<'a>,
    report: &'a mut dyn Write,
    i18n: I18n,
    options: SetupOptions,
}

impl<'a> SetupFlow<'a> {
    /// `console` carries the conversation; `report` receives the JSON summary.
    pub fn new(
        config: &Config,
        options: SetupOptions,
        console: Console<'a>,
        report: &'a mut dyn Write,
    ) -> Self {
        let workspace = Workspace::new(options.dir.clone(), config.files.clone());
        let document = workspace.current_language().as_lang();
        let lang = i18n::detect_lang(options.lang.as_deref(), &config.i18n.language, document);
        interrupt::set_language(lang);
        Self {
            workspace,
            console,
            report,
            i18n: I18n::new(lang),
            options,
        }
    }

    fn set_language(&mut self, lang: Lang) {
        self.i18n = I18n::new(lang);
        interrupt::set_language(lang);
    }

    pub fn run(mut self) -> Result<Outcome> {
        let i18n = self.i18n;
        let located = match self.workspace.locate_primary() {
            Ok(path) => path,
            Err(err) => {
                self.console.say(err.localized(&i18n))?;
                self.console.say(i18n.err_primary_location())?;
                return Ok(Outcome::Failed);
            }
        };
        self.console.say(i18n.file_found(&file_name(&located)))?;

        let current = self.workspace.current_language();
        let target = self.select_language(current)?;
        self.set_language(target);
        let i18n = self.i18n;

        self.console.blank()?;
        self.console.say(i18n.lang_switch_title())?;
        let switch = match self.workspace.switch_language(&i18n, target) {
            Ok(report) => report,
            Err(err) => {
                report_error(&mut self.console, &i18n, &err)?;
                self.console.say(i18n.err_lang_switch_failed())?;
                return Ok(Outcome::Failed);
            }
        };
        report_switch(&mut self.console, &i18n, &switch)?;

        if !self.should_configure()? {
            self.console.blank()?;
            self.console.say(i18n.exiting())?;
            self.console
                .say(i18n.exiting_summary(target.display_code()))?;
            if self.options.json {
                self.emit_json(&Summary::new(&switch, None))?;
            }
            return Ok(Outcome::LanguageOnly);
        }

        let memory_path = self.obtain_memory_path()?;
        let shown = memory_path.display().to_string();
        debug!(path = %shown, "memory path confirmed");

        let update = match self.workspace.update_memory_path(&i18n, &shown) {
            Ok(update) => update,
            Err(err) => {
                let primary = self.workspace.files().primary.clone();
                self.console
                    .say(i18n.err_update_file(&primary, &format!("{err:#}")))?;
                self.console.say(i18n.err_config_failed())?;
                return Ok(Outcome::Failed);
            }
        };

        if !self.report_update(&update)? {
            self.console.say(i18n.err_config_failed())?;
            return Ok(Outcome::Failed);
        }

        if self.options.json {
            self.emit_json(&Summary::new(&switch, Some((&update, &shown))))?;
        } else {
            self.report_completion(target, &shown, &update)?;
        }
        Ok(Outcome::Configured)
    }

    fn select_language(&mut self, current: DocLanguage) -> Result<Lang> {
        let i18n = self.i18n;
        if let Some(raw) = self.options.lang.clone() {
            match Lang::from_code(&raw) {
                Some(lang) => return Ok(lang),
                None => self.console.say(i18n.lang_flag_invalid(&raw))?,
            }
        }

        self.console.blank()?;
        self.console.say(i18n.lang_selection_title())?;
        self.console.say(i18n.lang_current(current.display_code()))?;
        self.console.blank()?;
        self.console.say(i18n.lang_select())?;
        self.console.say(i18n.lang_option_en())?;
        self.console.say(i18n.lang_option_ja())?;
        self.console.blank()?;

        loop {
            let answer = self.console.ask(i18n.lang_prompt())?;
            match Lang::from_choice(&answer) {
                Some(lang) => return Ok(lang),
                None => self.console.say(i18n.lang_invalid())?,
            }
        }
    }

    fn should_configure(&mut self) -> Result<bool> {
        if self.options.memory_path.is_some() {
            return Ok(true);
        }
        self.console.blank()?;
        self.confirm(self.i18n.continue_prompt())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.options.assume_yes {
            return Ok(true);
        }
        self.console.ask_yes_no(prompt, self.i18n.yes_no_invalid())
    }

    fn obtain_memory_path(&mut self) -> Result<PathBuf> {
        let i18n = self.i18n;
        let mut preset = self.options.memory_path.take();
        let mut screen_shown = false;

        loop {
            let raw = match preset.take() {
                Some(raw) => raw,
                None => {
                    if !screen_shown {
                        self.memory_screen()?;
                        screen_shown = true;
                    }
                    self.console.ask(i18n.memory_prompt())?
                }
            };

            let path = match paths::normalize_input(&raw, &self.options.cwd) {
                Ok(path) => path,
                Err(err) => {
                    self.console.say(err.localized(&i18n))?;
                    continue;
                }
            };
            let shown = path.display().to_string();

            if !path.exists() {
                self.console.say(i18n.memory_path_not_exists(&shown))?;
                if !self.confirm(i18n.memory_create_prompt())? {
                    self.console.say(i18n.memory_retry())?;
                    continue;
                }
                match paths::create_directory(&path) {
                    Ok(()) => self.console.say(i18n.memory_create_success(&shown))?,
                    Err(err) => {
                        self.console.say(err.localized(&i18n))?;
                        self.console.say(i18n.memory_retry())?;
                        continue;
                    }
                }
            }

            self.console.blank()?;
            self.console.say(i18n.memory_confirm_path(&shown))?;
            self.console.say(i18n.memory_confirm_structure())?;
            if self.confirm(i18n.memory_confirm_prompt())? {
                return Ok(path);
            }
            self.console.say(i18n.memory_confirm_retry())?;
        }
    }

    fn memory_screen(&mut self) -> Result<()> {
        let i18n = self.i18n;
        self.console.blank()?;
        self.console.say(i18n.memory_title())?;
        self.console.blank()?;
        self.console.say(i18n.memory_description())?;
        self.console.say(i18n.memory_description_detail())?;
        self.console.blank()?;
        self.console.say(i18n.memory_examples())?;
        for example in EXAMPLE_PATHS {
            self.console.say(format!("  - {example}"))?;
        }
        self.console.blank()?;
        self.console.say(i18n.memory_note())?;
        self.console.say(i18n.memory_note_detail())?;
        self.console.blank()
    }

    /// Print the outcome of the update; false when the primary was not updated.
    fn report_update(&mut self, update: &UpdateReport) -> Result<bool> {
        let i18n = self.i18n;
        let primary = file_name(&update.primary);
        let mirror = file_name(&update.mirror_path);

        self.console.blank()?;
        match &update.mirror {
            Some(MirrorStatus::Created) => self.console.say(i18n.mirror_created(&mirror))?,
            Some(MirrorStatus::NotUpdated(err)) => {
                self.console.say(err.localized(&i18n))?;
                self.console.say(i18n.file_warning_format())?;
            }
            Some(MirrorStatus::Failed(SetupError::MirrorWriteFailure { source, .. })) => {
                self.console
                    .say(i18n.mirror_warning(&mirror, &source.to_string()))?;
            }
            Some(MirrorStatus::Failed(err)) => self.console.say(err.localized(&i18n))?,
            Some(MirrorStatus::Updated) | None => {}
        }

        if !update.primary_updated() {
            let err = SetupError::PlaceholderNotFound(update.primary.clone());
            self.console.say(err.localized(&i18n))?;
            self.console.say(i18n.file_warning_format())?;
            return Ok(false);
        }

        self.console.say(i18n.memory_update_success())?;
        if update.placeholders > 0 {
            self.console
                .say(i18n.memory_update_replaced(update.placeholders))?;
        }
        match &update.mirror {
            Some(status) if status.is_written() => {
                self.console.say(i18n.memory_update_both(&primary, &mirror))?
            }
            Some(_) => self.console.say(i18n.memory_update_primary_only(&primary))?,
            None => {
                self.console.say(i18n.memory_update_primary_only(&primary))?;
                self.console.say(i18n.memory_update_mirror_later(&mirror))?;
            }
        }
        self.console.say(i18n.memory_update_note())?;
        Ok(true)
    }

    fn report_completion(&mut self, target: Lang, shown: &str, update: &UpdateReport) -> Result<()> {
        let i18n = self.i18n;
        let primary = file_name(&update.primary);
        let mirror = file_name(&update.mirror_path);
        let mirror_written = update.mirror.as_ref().is_some_and(MirrorStatus::is_written);

        self.console.blank()?;
        self.console.say(i18n.complete_title())?;
        self.console.blank()?;
        self.console.say(i18n.complete_summary())?;
        self.console.say(i18n.complete_lang(target.display_code()))?;
        self.console.say(i18n.complete_memory_path(shown))?;
        self.console.say(i18n.complete_primary_updated(&primary))?;
        if mirror_written {
            self.console.say(i18n.complete_mirror_updated(&mirror))?;
        }

        self.console.blank()?;
        self.console.say(i18n.complete_next_steps())?;
        let mut step = 1;
        self.console.say(i18n.complete_review(step, &primary))?;
        step += 1;
        let files = if mirror_written {
            self.console.say(i18n.complete_review(step, &mirror))?;
            step += 1;
            format!("{primary}, {mirror}")
        } else {
            primary
        };
        self.console.say(i18n.complete_copy_files(step, &files))?;

        self.console.blank()?;
        self.console.say(i18n.complete_structure_title())?;
        self.console.say(format!("  {shown}/"))?;
        for line in i18n.complete_structure() {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn emit_json(&mut self, summary: &Summary) -> Result<()> {
        let json =
            serde_json::to_string_pretty(summary).context(self.i18n.err_serialize_summary())?;
        writeln!(self.report, "{json}")?;
        Ok(())
    }
}

/// Print what a language switch did.
pub fn report_switch(console: &mut Console<'_>, i18n: &I18n, report: &SwitchReport) -> Result<()> {
    let primary = file_name(&report.primary);
    if !report.backups.is_empty() {
        console.say(i18n.lang_switch_backup(&primary, report.previous.display_code()))?;
        for backup in &report.backups {
            console.say(i18n.switcher_backup_saved(&file_name(backup)))?;
        }
    }

    console.say(i18n.lang_switch_success(report.target.display_code()))?;
    match &report.preserved {
        Some(path) => console.say(i18n.lang_switch_preserved(path))?,
        None => console.say(i18n.lang_switch_path_not_configured())?,
    }

    match &report.mirror {
        MirrorStatus::Created => {
            console.say(i18n.lang_switch_mirror_created(&file_name(&report.mirror_path)))?
        }
        MirrorStatus::Updated => {}
        MirrorStatus::NotUpdated(err) | MirrorStatus::Failed(err) => {
            console.say(err.localized(i18n))?
        }
    }
    console.say(i18n.lang_switch_complete())
}

/// Localized line for a fatal error.
pub fn report_error(console: &mut Console<'_>, i18n: &I18n, err: &anyhow::Error) -> Result<()> {
    match err.downcast_ref::<SetupError>() {
        Some(setup) => console.say(setup.localized(i18n)),
        None => console.say(format!("error: {err:#}")),
    }
}

/// Standalone switcher: switch to `target`, or show the current language.
pub fn run_switcher(
    config: &Config,
    dir: PathBuf,
    target: Option<&str>,
    bin: &str,
    console: &mut Console<'_>,
) -> Result<Outcome> {
    let workspace = Workspace::new(dir, config.files.clone());
    let current = workspace.current_language();
    let lang = i18n::detect_lang(None, &config.i18n.language, current.as_lang());
    interrupt::set_language(lang);
    let i18n = I18n::new(lang);

    let Some(raw) = target else {
        match current.as_lang() {
            Some(lang) => console.say(i18n.switcher_current_language(lang.display_code()))?,
            None => console.say(i18n.switcher_not_detected(&workspace.files().primary))?,
        }
        console.blank()?;
        console.say(i18n.switcher_usage(bin))?;
        return Ok(Outcome::LanguageOnly);
    };

    let Some(target) = Lang::from_code(raw) else {
        console.say(i18n.switcher_invalid_lang(raw))?;
        return Ok(Outcome::Failed);
    };
    interrupt::set_language(target);
    let i18n = I18n::new(target);

    match workspace.switch_language(&i18n, target) {
        Ok(report) => {
            report_switch(console, &i18n, &report)?;
            console.say(i18n.switcher_current_file(&file_name(&report.primary)))?;
            Ok(Outcome::LanguageOnly)
        }
        Err(err) => {
            report_error(console, &i18n, &err)?;
            console.say(i18n.err_lang_switch_failed())?;
            Ok(Outcome::Failed)
        }
    }
}
