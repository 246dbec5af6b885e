//! Ctrl-C handling.
//!
//! The handler prints the cancellation message in the language currently in
//! use and exits with status 1.

use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicU8, Ordering};

use anyhow::{Context, Result};

use crate::i18n::{I18n, Lang};

pub const EXIT_CANCELLED: i32 = 1;

/// Message language shared with the signal handler thread.
pub struct LanguageCell(AtomicU8);

impl LanguageCell {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    pub fn set(&self, lang: Lang) {
        self.0.store(encode(lang), Ordering::Relaxed);
    }

    pub fn i18n(&self) -> I18n {
        I18n::new(decode(self.0.load(Ordering::Relaxed)))
    }
}

impl Default for LanguageCell {
    fn default() -> Self {
        Self::new()
    }
}

static LANG: LanguageCell = LanguageCell::new();

/// Record the language later messages should use.
pub fn set_language(lang: Lang) {
    LANG.set(lang);
}

pub fn current_i18n() -> I18n {
    LANG.i18n()
}

fn encode(lang: Lang) -> u8 {
    match lang {
        Lang::En => 0,
        Lang::Ja => 1,
    }
}

fn decode(raw: u8) -> Lang {
    match raw {
        1 => Lang::Ja,
        _ => Lang::En,
    }
}

/// Blank line, then the localized cancellation notice.
pub fn write_cancelled(out: &mut dyn Write, i18n: &I18n) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", i18n.err_cancelled())?;
    out.flush()
}

/// Print the cancellation notice on stderr.
pub fn report_cancelled() {
    let _ = write_cancelled(&mut io::stderr(), &current_i18n());
}

pub fn install() -> Result<()> {
    ctrlc::set_handler(|| {
        report_cancelled();
        process::exit(EXIT_CANCELLED);
    })
    .context("failed to install Ctrl-C handler")
}
