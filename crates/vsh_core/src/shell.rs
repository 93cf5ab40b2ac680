//! The read-eval loop driving a [`Session`].

use crate::command::Command;
use crate::error::Result;
use crate::session::{Session, SessionState};
use std::collections::VecDeque;
use std::fmt;
use std::io::Write;

/// Prompt shown before each line is read, rendered as `user:/cwd$ `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub username: String,
    pub cwd: String,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}$ ", self.username, self.cwd)
    }
}

/// What the input side produced while the loop was waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line of input, without its terminator.
    Line(String),
    /// An external interrupt (Ctrl-C) arrived.
    Interrupted,
    /// Input was closed.
    Eof,
}

/// Source of input lines. Implementations display `prompt` and block until
/// an event is available.
pub trait LineSource {
    fn read_event(&mut self, prompt: &Prompt) -> Result<InputEvent>;
}

/// Replays a fixed list of events, then reports end of input.
///
/// Every prompt it is asked to display is kept for inspection.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
    prompts: Vec<Prompt>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Builds a script of plain input lines.
    pub fn lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|line| InputEvent::Line(line.into())))
    }

    /// Prompts displayed so far, in order.
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }
}

impl LineSource for ScriptedInput {
    fn read_event(&mut self, prompt: &Prompt) -> Result<InputEvent> {
        self.prompts.push(prompt.clone());
        Ok(self.events.pop_front().unwrap_or(InputEvent::Eof))
    }
}

/// Runs the interactive loop until the session terminates.
///
/// Prints the welcome banner, then reads one event per iteration. Lines are
/// parsed and executed; an interrupt or end of input performs the `exit`
/// path. The caller is expected to [`Session::close`] afterwards.
pub fn run(session: &mut Session, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Welcome, {}! Type 'exit' to quit.", session.username())?;
    out.flush()?;

    while session.state() == SessionState::Running {
        let prompt = session.prompt();
        match input.read_event(&prompt)? {
            InputEvent::Line(line) => {
                let command = Command::parse(&line);
                session.execute(&command, out)?;
            }
            InputEvent::Interrupted | InputEvent::Eof => session.interrupt(out)?,
        }
        out.flush()?;
    }
    Ok(())
}
