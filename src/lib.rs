pub mod cli;
pub mod commands;
pub mod config;
pub mod detect;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod interrupt;
pub mod localize;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod substitute;
pub mod workspace;
#[cfg(test)]
mod test_support;
