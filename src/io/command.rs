//! Line-oriented operator commands

use crate::algorithm::feedback::Verdict;
use crate::io::error::{CircuitError, Result, invalid_argument};

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  generate                   fill the grid with random components
  add <row> <col> <type>     place a component (name, symbol or code)
  remove <row> <col>         clear a cell
  test                       check the circuit rules
  feedback <accept|reject>   record a verdict (reject applies a correction)
  correct                    apply a correction to the current grid
  print                      show the grid
  clear                      reset the grid to empty
  status                     show the editor state and last verdict
  legend                     list component kinds
  help                       show this text
  quit                       leave the editor";

/// One decoded operator command
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Random fill
    Generate,
    /// Place a component
    Add {
        /// Row index as typed
        row: i64,
        /// Column index as typed
        col: i64,
        /// Component name, symbol or code as typed
        kind: String,
    },
    /// Clear a cell
    Remove {
        /// Row index as typed
        row: i64,
        /// Column index as typed
        col: i64,
    },
    /// Run the circuit tester
    Test,
    /// Record a verdict
    Feedback(Verdict),
    /// Apply a correction
    Correct,
    /// Render the grid
    Print,
    /// Reset the grid
    Clear,
    /// Report state and last verdict
    Status,
    /// List component kinds
    Legend,
    /// Show help
    Help,
    /// Leave the command loop
    Quit,
}

impl Command {
    /// Decode one input line
    ///
    /// Blank lines and lines starting with `#` decode to `None`.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedCommand` for an unknown keyword, and
    /// `MissingArgument` or `InvalidArgument` for malformed arguments
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        if keyword.starts_with('#') {
            return Ok(None);
        }

        let command = match keyword.to_ascii_lowercase().as_str() {
            "generate" | "gen" => Self::Generate,
            "add" | "place" => {
                let row = coordinate(&mut tokens, "add", "row")?;
                let col = coordinate(&mut tokens, "add", "col")?;
                let kind = tokens
                    .next()
                    .ok_or(CircuitError::MissingArgument {
                        command: "add",
                        argument: "type",
                    })?
                    .to_string();
                Self::Add { row, col, kind }
            }
            "remove" | "rm" => {
                let row = coordinate(&mut tokens, "remove", "row")?;
                let col = coordinate(&mut tokens, "remove", "col")?;
                Self::Remove { row, col }
            }
            "test" => Self::Test,
            "feedback" => {
                let token = tokens.next().ok_or(CircuitError::MissingArgument {
                    command: "feedback",
                    argument: "verdict",
                })?;
                Self::Feedback(parse_verdict(token)?)
            }
            "accept" => Self::Feedback(Verdict::Accepted),
            "reject" => Self::Feedback(Verdict::Rejected),
            "correct" | "fix" => Self::Correct,
            "print" | "show" => Self::Print,
            "clear" | "init" | "reset" => Self::Clear,
            "status" => Self::Status,
            "legend" | "types" => Self::Legend,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return Err(CircuitError::UnrecognizedCommand {
                    command: keyword.to_string(),
                });
            }
        };

        if let Some(extra) = tokens.next() {
            return Err(invalid_argument(
                command.keyword(),
                "arguments",
                &format!("unexpected '{extra}'"),
            ));
        }

        Ok(Some(command))
    }

    /// Canonical keyword of the command
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Test => "test",
            Self::Feedback(_) => "feedback",
            Self::Correct => "correct",
            Self::Print => "print",
            Self::Clear => "clear",
            Self::Status => "status",
            Self::Legend => "legend",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

fn coordinate<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<i64> {
    let token = tokens
        .next()
        .ok_or(CircuitError::MissingArgument { command, argument })?;
    token
        .parse::<i64>()
        .map_err(|error| invalid_argument(command, argument, &format!("'{token}': {error}")))
}

fn parse_verdict(token: &str) -> Result<Verdict> {
    match token.to_ascii_lowercase().as_str() {
        "accept" | "accepted" | "yes" | "good" | "1" => Ok(Verdict::Accepted),
        "reject" | "rejected" | "no" | "bad" | "0" => Ok(Verdict::Rejected),
        _ => Err(invalid_argument(
            "feedback",
            "verdict",
            &format!("'{token}' is not accept or reject"),
        )),
    }
}
