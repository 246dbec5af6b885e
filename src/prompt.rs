//! Line-oriented console prompts.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::Result;

use crate::error::SetupError;

pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line. End of input is `Cancelled`.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SetupError::Cancelled.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is yes or no.
    pub fn ask_yes_no(&mut self, prompt: &str, retry: &str) -> Result<bool> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => self.say(retry)?,
            }
        }
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
