use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use tracing::warn;

use agents_md_setup::cli::{Command, SetupCli};
use agents_md_setup::commands::{extract_lang_arg, generate_completions, handle_config};
use agents_md_setup::config::Config;
use agents_md_setup::error::is_cancelled;
use agents_md_setup::flow::{SetupFlow, SetupOptions};
use agents_md_setup::i18n::{self, I18n};
use agents_md_setup::prompt::Console;
use agents_md_setup::{interrupt, localize, logging};

fn main() -> ExitCode {
    logging::init();

    // 1. Pre-parse to extract --lang argument (if any)
    let pre_args: Vec<String> = std::env::args().collect();
    let lang_override = extract_lang_arg(&pre_args);

    // 2. Load config (ignore errors, use defaults)
    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config");
        Config::default()
    });

    // 3. Detect language
    let lang = i18n::detect_lang(lang_override.as_deref(), &config.i18n.language, None);
    let i18n = I18n::new(lang);
    interrupt::set_language(lang);

    // 4. Get and localize Command
    let cmd = localize::localize_command(SetupCli::command(), &i18n);

    // 5. Parse arguments with localized command
    // Note: get_matches() handles all parsing errors (exits on failure),
    // so from_arg_matches cannot fail with a valid ArgMatches.
    let cli = SetupCli::from_arg_matches(&cmd.get_matches())
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

fn run(i18n: &I18n, config: &Config, cli: SetupCli) -> Result<ExitCode> {
    match cli.command {
        Some(Command::Config(args)) => {
            handle_config(i18n, args, cli.dir.as_deref(), &mut io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }

        Some(Command::Completions(args)) => {
            generate_completions(args.shell, &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }

        None => {
            let cwd = std::env::current_dir().context(i18n.err_current_dir())?;
            let options = SetupOptions {
                dir: cli.dir.unwrap_or_else(|| cwd.clone()),
                cwd,
                lang: cli.lang,
                memory_path: cli.memory_path,
                assume_yes: cli.yes,
                json: cli.json,
            };

            let stdin = io::stdin();
            let mut input = stdin.lock();
            // With --json the conversation moves to stderr so stdout stays parseable.
            let mut stdout = io::stdout();
            let mut stderr = io::stderr();
            let mut summary = io::stdout();
            let output: &mut dyn Write = if options.json {
                &mut stderr
            } else {
                &mut stdout
            };
            let input: &mut dyn BufRead = &mut input;

            let console = Console::new(input, output);
            let outcome = SetupFlow::new(config, options, console, &mut summary).run()?;
            Ok(outcome.exit_code())
        }
    }
}
