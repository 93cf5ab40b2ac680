//! Terminal input: stdin lines and Ctrl-C delivered on one channel.

use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::warn;
use vsh_core::{InputEvent, LineSource, Prompt};

/// Reads stdin on a helper thread so an interrupt can end the wait for
/// input without a line being entered.
pub struct TerminalInput {
    events: Receiver<InputEvent>,
}

impl TerminalInput {
    /// Installs the Ctrl-C handler and starts the stdin reader.
    pub fn spawn() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let interrupts = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupts.send(InputEvent::Interrupted);
        })?;

        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || read_lines(tx))?;

        Ok(Self { events: rx })
    }
}

impl LineSource for TerminalInput {
    fn read_event(&mut self, prompt: &Prompt) -> vsh_core::Result<InputEvent> {
        let mut stdout = io::stdout();
        write!(
            stdout,
            "{}:{}$ ",
            style(&prompt.username).green().bold(),
            style(&prompt.cwd).blue().bold()
        )?;
        stdout.flush()?;

        Ok(self.events.recv().unwrap_or(InputEvent::Eof))
    }
}

fn read_lines(tx: Sender<InputEvent>) {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        line.clear();
        let event = match stdin.lock().read_line(&mut line) {
            Ok(0) => InputEvent::Eof,
            Ok(_) => InputEvent::Line(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                InputEvent::Eof
            }
        };

        let finished = event == InputEvent::Eof;
        if tx.send(event).is_err() || finished {
            break;
        }
    }
}
