use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use tracing::warn;

use agents_md_setup::cli::SwitcherCli;
use agents_md_setup::config::Config;
use agents_md_setup::error::is_cancelled;
use agents_md_setup::flow::run_switcher;
use agents_md_setup::i18n::{self, I18n};
use agents_md_setup::prompt::Console;
use agents_md_setup::{interrupt, localize, logging};

const BIN_NAME: &str = "agents-md-lang";

fn main() -> ExitCode {
    logging::init();

    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config");
        Config::default()
    });
    let i18n = I18n::new(i18n::detect_lang(None, &config.i18n.language, None));
    interrupt::set_language(i18n.lang());

    let cmd = localize::localize_command(SwitcherCli::command(), &i18n);
    let cli = SwitcherCli::from_arg_matches(&cmd.get_matches())
        .expect("clap derive should match parsed arguments");

    if let Err(err) = interrupt::install() {
        warn!(error = %err, "continuing without Ctrl-C handler");
    }

    match run(&i18n, &config, cli) {
        Ok(code) => code,
        Err(e) if is_cancelled(&e) => {
            interrupt::report_cancelled();
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::from(1)
        }
    }
}

fn run(i18n: &I18n, config: &Config, cli: SwitcherCli) -> Result<ExitCode> {
    let dir = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context(i18n.err_current_dir())?,
    };

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let mut console = Console::new(&mut input, &mut output);
    let outcome = run_switcher(config, dir, cli.lang.as_deref(), BIN_NAME, &mut console)?;
    Ok(outcome.exit_code())
}
