//! Line-oriented test scripts.
//!
//! ```text
//! # comment
//! t 0                 begin test 0
//! n 10010110          construct from bitstring
//! r 0 8 -1            rotate offset length right-amount
//! e 00101101          expect
//! ```
//!
//! Only the first character of a line's first word selects the command.
//! Lines of a test run only when the test is selected. A line that cannot be
//! understood is reported and skipped.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::report::{Entry, Location, Summary};
use crate::Harness;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("could not read test script {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(char),
    #[error("command {command:?} is missing its {argument} argument")]
    MissingArgument { command: char, argument: &'static str },
    #[error("command {command:?} has an invalid {argument} {value:?}: {source}")]
    InvalidNumber {
        command: char,
        argument: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Which tests of a script to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TestSelection {
    #[default]
    All,
    Only(u64),
}

impl TestSelection {
    #[must_use]
    pub fn includes(self, test_id: u64) -> bool {
        match self {
            TestSelection::All => true,
            TestSelection::Only(selected) => selected == test_id,
        }
    }
}

impl From<Option<u64>> for TestSelection {
    fn from(selected: Option<u64>) -> Self {
        selected.map_or(TestSelection::All, TestSelection::Only)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Comment,
    BeginTest(u64),
    Construct(String),
    Expect(String),
    Rotate {
        bit_offset: usize,
        bit_length: usize,
        bit_right_amount: isize,
    },
}

impl Command {
    /// Returns the command tag of `line`, or `None` for blank lines.
    #[must_use]
    pub fn tag(line: &str) -> Option<char> {
        line.split_whitespace().next().and_then(|word| word.chars().next())
    }

    /// Parses one script line.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for an unknown tag, a missing argument or a
    /// number that does not parse.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let Some(tag) = words.next().and_then(|word| word.chars().next()) else {
            return Ok(Command::Comment);
        };
        let mut next = |argument: &'static str| {
            words.next().ok_or(CommandError::MissingArgument { command: tag, argument })
        };
        match tag {
            '#' => Ok(Command::Comment),
            't' => Ok(Command::BeginTest(parse_number(tag, "test id", next("test id")?)?)),
            'n' => Ok(Command::Construct(next("bitstring")?.to_owned())),
            'e' => Ok(Command::Expect(next("bitstring")?.to_owned())),
            'r' => {
                let bit_offset = parse_number(tag, "offset", next("offset")?)?;
                let bit_length = parse_number(tag, "length", next("length")?)?;
                let bit_right_amount = parse_number(tag, "amount", next("amount")?)?;
                Ok(Command::Rotate {
                    bit_offset,
                    bit_length,
                    bit_right_amount,
                })
            }
            other => Err(CommandError::Unknown(other)),
        }
    }
}

fn parse_number<Number>(command: char, argument: &'static str, value: &str) -> Result<Number, CommandError>
where
    Number: std::str::FromStr<Err = ParseIntError>,
{
    value.parse().map_err(|source| CommandError::InvalidNumber {
        command,
        argument,
        value: value.to_owned(),
        source,
    })
}

impl Harness {
    /// Runs the tests of `source` chosen by `selection`, in file order.
    ///
    /// `name` labels findings, e.g. with the script's path. Results are
    /// appended to the transcript; the returned summary covers this run only.
    pub fn run_script(&mut self, name: &str, source: &str, selection: TestSelection) -> Summary {
        let first_entry = self.transcript().len();
        let mut ready_to_run = false;
        for (line_index, line) in source.lines().enumerate() {
            let line_number = line_index + 1;
            let Some(tag) = Command::tag(line) else {
                continue;
            };
            if !ready_to_run && matches!(tag, 'n' | 'e' | 'r') {
                continue;
            }
            let command = match Command::parse(line) {
                Ok(command) => command,
                Err(CommandError::Unknown(_)) => {
                    warn!(line = line_number, text = line, "unknown command");
                    self.record(Entry::UnknownCommand {
                        line: line_number,
                        text: line.to_owned(),
                    });
                    continue;
                }
                Err(error) => {
                    warn!(line = line_number, %error, "malformed command");
                    if tag == 't' {
                        ready_to_run = false;
                    }
                    self.record(Entry::MalformedCommand {
                        line: line_number,
                        text: line.trim().to_owned(),
                        reason: error.to_string(),
                    });
                    continue;
                }
            };
            self.locate(Location::new(name, line_number));
            debug!(line = line_number, ?command, "running command");
            match command {
                Command::Comment => {}
                Command::BeginTest(test_id) => {
                    ready_to_run = selection.includes(test_id);
                    if ready_to_run {
                        info!(test_id, "running test");
                        self.record(Entry::TestStarted(test_id));
                    }
                }
                Command::Construct(bitstring) => self.construct_from_bitstring(&bitstring),
                Command::Expect(bitstring) => {
                    self.expect(&bitstring);
                }
                Command::Rotate {
                    bit_offset,
                    bit_length,
                    bit_right_amount,
                } => {
                    if self.validate_bounds(bit_offset, bit_length, bit_right_amount) {
                        self.rotate(bit_offset, bit_length, bit_right_amount);
                    }
                }
            }
        }
        let summary = Summary::of(&self.transcript()[first_entry..]);
        info!(script = name, %summary, "finished test script");
        summary
    }

    /// Reads `path` and runs it with [`run_script`](Harness::run_script).
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Read`] if the file cannot be read.
    pub fn run_script_file(&mut self, path: &Path, selection: TestSelection) -> Result<Summary, ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(self.run_script(&path.display().to_string(), &source, selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_command() {
        assert_eq!(Command::parse("# note"), Ok(Command::Comment));
        assert_eq!(Command::parse("   "), Ok(Command::Comment));
        assert_eq!(Command::parse("t 12"), Ok(Command::BeginTest(12)));
        assert_eq!(Command::parse("n 0101"), Ok(Command::Construct("0101".to_owned())));
        assert_eq!(Command::parse("  e\t0101  "), Ok(Command::Expect("0101".to_owned())));
        assert_eq!(
            Command::parse("r 1 5 -3"),
            Ok(Command::Rotate {
                bit_offset: 1,
                bit_length: 5,
                bit_right_amount: -3
            })
        );
    }

    #[test]
    fn rejects_unknown_and_malformed_lines() {
        assert_eq!(Command::parse("x 1"), Err(CommandError::Unknown('x')));
        assert_eq!(
            Command::parse("r 1 5"),
            Err(CommandError::MissingArgument {
                command: 'r',
                argument: "amount"
            })
        );
        assert!(matches!(
            Command::parse("r -1 5 2"),
            Err(CommandError::InvalidNumber { argument: "offset", .. })
        ));
        assert!(matches!(Command::parse("t"), Err(CommandError::MissingArgument { command: 't', .. })));
    }

    #[test]
    fn selection_gate() {
        assert!(TestSelection::All.includes(3));
        assert!(TestSelection::Only(3).includes(3));
        assert!(!TestSelection::Only(3).includes(4));
        assert_eq!(TestSelection::from(None), TestSelection::All);
        assert_eq!(TestSelection::from(Some(2)), TestSelection::Only(2));
    }
}
