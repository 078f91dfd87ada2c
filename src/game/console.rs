//! Line-oriented front end over any reader/writer pair
//!
//! Used for `--plain` play on stdin/stdout and for scripted sessions.

use super::{Collaborator, Command, Event};
use crate::Result;
use std::io::{BufRead, Write};

pub struct ConsoleCollaborator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleCollaborator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read the next non-blank line, trimmed. `None` at
    /// end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}

impl<R: BufRead, W: Write> Collaborator for ConsoleCollaborator<R, W> {
    fn request_command(&mut self) -> Result<Command> {
        // Running out of input is as good as walking out the door.
        Ok(self
            .ask("Option (l/r/x): ")?
            .map(|token| Command::parse(&token))
            .unwrap_or(Command::Exit))
    }

    fn request_accused_name(&mut self) -> Result<String> {
        Ok(self
            .ask("\nName the suspect you accuse: ")?
            .unwrap_or_default())
    }

    fn report(&mut self, event: &Event) {
        let result = event
            .lines()
            .iter()
            .try_for_each(|line| writeln!(self.output, "{}", line));
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not write to the console");
        }
    }
}
