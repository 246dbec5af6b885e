//! Runtime localization for clap Command help text.
//!
//! clap's derive help strings are compile-time English; both binaries pass
//! their command tree through here after the message language is known.

use clap::Command;

use crate::i18n::I18n;

/// Localize all help text in a Command tree.
///
/// Walks the command and its subcommands recursively, replacing about and
/// argument help with the localized versions.
pub fn localize_command(cmd: Command, i18n: &I18n) -> Command {
    let name = cmd.get_name().to_string();

    // Collect subcommand names first to avoid borrowing issues
    let subcommand_names: Vec<String> = cmd
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect();

    let about = get_command_about(&name, i18n);
    let mut cmd = if about.is_empty() {
        cmd
    } else {
        cmd.about(about)
    };

    cmd = localize_args(cmd, &name, i18n);

    for sub_name in subcommand_names {
        cmd = cmd.mut_subcommand(&sub_name, |sub| localize_command(sub, i18n));
    }

    cmd
}

fn get_command_about(name: &str, i18n: &I18n) -> &'static str {
    match name {
        "agents-md-setup" => i18n.help_app_about(),
        "agents-md-lang" => i18n.help_switcher_about(),
        "config" => i18n.help_cmd_config(),
        "completions" => i18n.help_cmd_completions(),
        // Config subcommands
        "get" => i18n.help_cmd_config_get(),
        "set" => i18n.help_cmd_config_set(),
        "list" => i18n.help_cmd_config_list(),
        "reset" => i18n.help_cmd_config_reset(),
        "path" => i18n.help_cmd_config_path(),
        "files" => i18n.help_cmd_config_files(),
        _ => "", // Keep original for unknown commands
    }
}

fn localize_args(cmd: Command, cmd_name: &str, i18n: &I18n) -> Command {
    match cmd_name {
        "agents-md-setup" => cmd
            .mut_arg("lang", |arg| arg.help(i18n.help_arg_lang()))
            .mut_arg("dir", |arg| arg.help(i18n.help_arg_dir()))
            .mut_arg("memory_path", |arg| arg.help(i18n.help_arg_memory_path()))
            .mut_arg("yes", |arg| arg.help(i18n.help_arg_yes()))
            .mut_arg("json", |arg| arg.help(i18n.help_arg_json())),
        "agents-md-lang" => cmd
            .mut_arg("lang", |arg| arg.help(i18n.help_arg_target_lang()))
            .mut_arg("dir", |arg| arg.help(i18n.help_arg_dir())),
        "get" => cmd.mut_arg("key", |arg| arg.help(i18n.help_arg_config_key())),
        "set" => cmd
            .mut_arg("key", |arg| arg.help(i18n.help_arg_config_key()))
            .mut_arg("value", |arg| arg.help(i18n.help_arg_config_value())),
        "completions" => cmd.mut_arg("shell", |arg| arg.help(i18n.help_arg_shell())),
        _ => cmd, // No args to localize for other commands
    }
}
