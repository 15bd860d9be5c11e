//! The harness context: the bit vector under test plus everything needed to
//! drive and report on it.

use bitpack::{rotate_with, BitVec, BitVecError, Bitwise, RotationAlgorithm};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::config::HarnessConfig;
use crate::report::{Entry, Failure, Finding, Location, MismatchKind, Transcript, Verdict};

/// Owns the current test subject and records results.
///
/// Each `construct_*` call drops the previous subject before allocating the
/// next one. Operations that need a subject panic when there is none.
pub struct Harness {
    subject: Option<BitVec>,
    verbose: bool,
    algorithm: RotationAlgorithm,
    location: Location,
    transcript: Transcript,
    sink: Option<Box<dyn FnMut(&Entry)>>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(&HarnessConfig::default())
    }
}

fn parse_bitstring(bitstring: &str) -> BitVec {
    match bitstring.parse() {
        Ok(bits) => bits,
        Err(error) => panic!("malformed bitstring {bitstring:?}: {error}"),
    }
}

impl Harness {
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            subject: None,
            verbose: config.verbose,
            algorithm: config.algorithm,
            location: Location::default(),
            transcript: Transcript::default(),
            sink: None,
        }
    }

    #[must_use]
    pub fn subject(&self) -> Option<&BitVec> {
        self.subject.as_ref()
    }

    /// Drops the current subject, if any.
    pub fn release(&mut self) {
        self.subject = None;
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    #[must_use]
    pub fn algorithm(&self) -> RotationAlgorithm {
        self.algorithm
    }

    /// Sets the location attached to subsequent findings.
    pub fn locate(&mut self, location: Location) {
        self.location = location;
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Passes every entry to `sink` as soon as it is recorded.
    ///
    /// Entries still go to the transcript. A later panic therefore cannot
    /// hide what was reported before it.
    pub fn report_to(&mut self, sink: impl FnMut(&Entry) + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub(crate) fn record(&mut self, entry: impl Into<Entry>) {
        let entry = entry.into();
        if let Some(sink) = self.sink.as_mut() {
            sink(&entry);
        }
        self.transcript.push(entry);
    }

    fn expect_subject(&self) -> &BitVec {
        match &self.subject {
            Some(subject) => subject,
            None => panic!("no bit vector under test"),
        }
    }

    fn echo(&mut self, suffix: Option<String>) {
        let bits = self.expect_subject().to_string();
        let text = match suffix {
            Some(suffix) => format!("{bits} {suffix}"),
            None => bits,
        };
        self.record(Entry::Echo(text));
    }

    /// Replaces the subject with the bits spelled by `bitstring` and echoes it.
    ///
    /// # Panics
    ///
    /// Panics if `bitstring` contains anything but `'0'` and `'1'`.
    pub fn construct_from_bitstring(&mut self, bitstring: &str) {
        self.release();
        let subject = parse_bitstring(bitstring);
        debug!(length = subject.len(), "constructed subject from bitstring");
        self.subject = Some(subject);
        if self.verbose {
            self.echo(Some(format!("newstr lit={bitstring}")));
            self.expect(bitstring);
        } else {
            self.echo(None);
        }
    }

    /// Replaces the subject with `bit_count` random bits drawn from a
    /// generator seeded with `seed`.
    ///
    /// Equal `(bit_count, seed)` pairs give identical subjects, whatever the
    /// harness did before.
    ///
    /// # Errors
    ///
    /// Returns [`BitVecError::Allocation`] when the subject cannot be
    /// allocated; the harness is then left without a subject.
    pub fn construct_random(&mut self, bit_count: usize, seed: u64) -> Result<(), BitVecError> {
        self.release();
        let mut subject = BitVec::try_zeros(bit_count)?;
        subject.randomize(&mut StdRng::seed_from_u64(seed));
        debug!(bit_count, seed, "constructed random subject");
        self.subject = Some(subject);
        if self.verbose {
            self.echo(Some(format!("newrand sz={bit_count}, seed={seed}")));
        }
        Ok(())
    }

    /// Rotates the subject's `[bit_offset, bit_offset + bit_length)` right by
    /// `bit_right_amount`.
    ///
    /// # Panics
    ///
    /// Panics if there is no subject or the range does not fit it.
    pub fn rotate(&mut self, bit_offset: usize, bit_length: usize, bit_right_amount: isize) {
        let algorithm = self.algorithm;
        let Some(subject) = self.subject.as_mut() else {
            panic!("no bit vector under test");
        };
        rotate_with(algorithm, subject, bit_offset, bit_length, bit_right_amount);
        debug!(bit_offset, bit_length, bit_right_amount, %algorithm, "rotated subject");
        if self.verbose {
            self.echo(Some(format!(
                "rotate off={bit_offset}, len={bit_length}, amnt={bit_right_amount}"
            )));
        }
    }

    /// Compares the subject with `bitstring` and records PASS or FAIL.
    ///
    /// A failure is preceded by an echo of the actual bits. Returns whether
    /// the subject matched.
    ///
    /// # Panics
    ///
    /// Panics if there is no subject or `bitstring` is malformed.
    pub fn expect(&mut self, bitstring: &str) -> bool {
        let expected = parse_bitstring(bitstring);
        let actual = self.expect_subject();
        let common = expected.len().min(actual.len());
        let kind = if (0..common).any(|index| expected.index(index) != actual.index(index)) {
            Some(MismatchKind::Content)
        } else if expected.len() != actual.len() {
            Some(MismatchKind::Size)
        } else {
            None
        };
        let verdict = match kind {
            None => Verdict::Pass,
            Some(kind) => {
                let actual = actual.to_string();
                self.record(Entry::Echo(format!("{actual} expect bits={bitstring}")));
                warn!(location = %self.location, %kind, expected = bitstring, %actual, "expectation failed");
                Verdict::Fail(Failure::Mismatch {
                    kind,
                    expected: bitstring.to_owned(),
                    actual,
                })
            }
        };
        let passed = verdict == Verdict::Pass;
        self.record(Finding {
            location: self.location.clone(),
            verdict,
        });
        passed
    }

    /// Checks that a scripted rotation fits the subject, recording a suite
    /// error if it does not. Passing checks record nothing.
    ///
    /// # Panics
    ///
    /// Panics if there is no subject.
    pub fn validate_bounds(&mut self, bit_offset: usize, bit_length: usize, bit_right_amount: isize) -> bool {
        let subject_length = self.expect_subject().len();
        let fits = bit_offset < subject_length
            && bit_length <= subject_length
            && bit_offset
                .checked_add(bit_length)
                .is_some_and(|end| end <= subject_length);
        if !fits {
            warn!(
                location = %self.location,
                bit_offset, bit_length, bit_right_amount, subject_length,
                "rotation does not fit the subject"
            );
            self.record(Finding {
                location: self.location.clone(),
                verdict: Verdict::Fail(Failure::SuiteError {
                    bit_offset,
                    bit_length,
                    subject_length,
                }),
            });
        }
        fits
    }
}
