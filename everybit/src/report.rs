//! Structured results of harness commands.
//!
//! Nothing here aborts: a failed expectation or a bad script line becomes an
//! [`Entry`] in the [`Transcript`] and execution continues.

use std::fmt;

use derive_more::{Deref, Display};

/// Where a finding was reported from, e.g. a script file and line.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
#[display("{source} at line {line}")]
pub struct Location {
    pub source: String,
    pub line: usize,
}

impl Location {
    #[must_use]
    pub fn new(source: impl Into<String>, line: usize) -> Self {
        Self {
            source: source.into(),
            line,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("harness", 0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum MismatchKind {
    #[display("size")]
    Size,
    #[display("content")]
    Content,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// The subject differs from the expected bitstring.
    Mismatch {
        kind: MismatchKind,
        expected: String,
        actual: String,
    },
    /// A rotation in the script does not fit the subject; the script is wrong,
    /// not the implementation.
    SuiteError {
        bit_offset: usize,
        bit_length: usize,
        subject_length: usize,
    },
}

impl fmt::Display for Failure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Mismatch { kind, expected, actual } => write!(
                formatter,
                "Incorrect bit_vector {kind}.\n    Expected: {expected}\n    Actual:   {actual}"
            ),
            Failure::SuiteError {
                bit_offset,
                bit_length,
                subject_length,
            } => write!(
                formatter,
                "TEST SUITE ERROR - bit_offset ({bit_offset}) + bit_length ({bit_length}) > bit_vector_length ({subject_length})"
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    pub location: Location,
    pub verdict: Verdict,
}

impl Finding {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match &self.verdict {
            Verdict::Pass => None,
            Verdict::Fail(failure) => Some(failure),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Pass => write!(formatter, " --> {}: PASS", self.location),
            Verdict::Fail(failure) => write!(formatter, " --> {}: FAIL\n    Reason: {failure}", self.location),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    TestStarted(u64),
    /// The subject's bits, optionally followed by what produced them.
    Echo(String),
    Finding(Finding),
    UnknownCommand { line: usize, text: String },
    MalformedCommand { line: usize, text: String, reason: String },
}

impl From<Finding> for Entry {
    fn from(finding: Finding) -> Self {
        Entry::Finding(finding)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::TestStarted(id) => write!(formatter, "\nRunning test #{id}..."),
            Entry::Echo(text) => formatter.write_str(text),
            Entry::Finding(finding) => write!(formatter, "{finding}"),
            Entry::UnknownCommand { text, .. } => write!(formatter, "Unknown command {text}"),
            Entry::MalformedCommand { line, text, reason } => {
                write!(formatter, "Malformed command at line {line}: {text} ({reason})")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
#[display("{passed} passed, {failed} failed")]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    /// Counts the findings among `entries`.
    #[must_use]
    pub fn of(entries: &[Entry]) -> Self {
        entries.iter().fold(Summary::default(), |mut summary, entry| {
            if let Entry::Finding(finding) = entry {
                if finding.passed() {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
            }
            summary
        })
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Everything a harness reported, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref)]
pub struct Transcript {
    #[deref]
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Finding(finding) => Some(finding),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.findings().filter_map(Finding::failure)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::of(&self.entries)
    }
}
