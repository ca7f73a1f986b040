//! Clipboard program invocation value object

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error when a clipboard command line is empty
#[derive(Debug, Clone, Error)]
#[error("Clipboard command must name a program")]
pub struct EmptyCommandError;

/// An external program plus its arguments.
///
/// Parsed from a whitespace-separated command line; there is no shell
/// quoting, so arguments cannot contain spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    program: String,
    args: Vec<String>,
}

impl ClipboardCommand {
    /// Create a command from a program name and arguments
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a command that takes no arguments
    pub fn bare(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Program name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl FromStr for ClipboardCommand {
    type Err = EmptyCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let program = parts.next().ok_or(EmptyCommandError)?;
        Ok(Self::new(program, parts))
    }
}

impl fmt::Display for ClipboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_program_and_args() {
        let cmd: ClipboardCommand = "xclip -selection clipboard -in".parse().unwrap();
        assert_eq!(cmd.program(), "xclip");
        assert_eq!(cmd.args(), ["-selection", "clipboard", "-in"]);
    }

    #[test]
    fn parses_bare_program() {
        let cmd: ClipboardCommand = "  pbcopy ".parse().unwrap();
        assert_eq!(cmd.program(), "pbcopy");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn rejects_blank() {
        assert!("".parse::<ClipboardCommand>().is_err());
        assert!("   ".parse::<ClipboardCommand>().is_err());
    }

    #[test]
    fn display_joins_with_spaces() {
        let cmd = ClipboardCommand::new("wl-paste", ["--no-newline"]);
        assert_eq!(cmd.to_string(), "wl-paste --no-newline");
    }
}
