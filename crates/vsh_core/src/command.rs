//! Tokenizer turning an input line into a [`Command`].

/// Parsed shell command.
///
/// Argument-taking variants hold `None` when the argument is missing so the
/// handler can print its usage line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Exit,
    Ls,
    Cd(Option<String>),
    Touch(Option<String>),
    Rmdir(Option<String>),
    Rev(Option<String>),
    Unknown(String),
}

impl Command {
    /// Verbs matched by prefix, in matching order.
    const PREFIXES: [&'static str; 5] = ["ls", "cd", "touch", "rmdir", "rev"];

    /// Classifies one line of input.
    ///
    /// `exit` must be the whole (trimmed) line and is case-insensitive. The
    /// other verbs match when the line merely starts with them, so `lsfoo`
    /// is `ls`. The argument is the second whitespace-separated token; any
    /// further tokens are ignored.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            return Self::Exit;
        }

        let Some(verb) = Self::PREFIXES.iter().find(|verb| line.starts_with(**verb)) else {
            return Self::Unknown(line.to_string());
        };
        let arg = line.split_whitespace().nth(1).map(str::to_string);

        match *verb {
            "ls" => Self::Ls,
            "cd" => Self::Cd(arg),
            "touch" => Self::Touch(arg),
            "rmdir" => Self::Rmdir(arg),
            _ => Self::Rev(arg),
        }
    }

    /// Text recorded in the audit log when the command succeeds.
    pub fn audit_action(&self) -> Option<String> {
        match self {
            Self::Exit => Some("exit".to_string()),
            Self::Ls => Some("ls".to_string()),
            Self::Cd(Some(arg)) => Some(format!("cd {}", arg)),
            Self::Touch(Some(arg)) => Some(format!("touch {}", arg)),
            Self::Rmdir(Some(arg)) => Some(format!("rmdir {}", arg)),
            Self::Rev(Some(arg)) => Some(format!("rev {}", arg)),
            _ => None,
        }
    }
}
