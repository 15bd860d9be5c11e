use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::rc::Rc;

use bitpack::RotationAlgorithm;
use everybit::{CommandError, Entry, Failure, Harness, HarnessConfig, MismatchKind, ScriptError, TestSelection};

fn data_file(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

fn started_tests(harness: &Harness) -> Vec<u64> {
    harness
        .transcript()
        .iter()
        .filter_map(|entry| match entry {
            Entry::TestStarted(id) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn bundled_script_passes_with_every_algorithm() {
    for algorithm in RotationAlgorithm::ALL {
        let mut harness = Harness::new(&HarnessConfig {
            algorithm,
            ..HarnessConfig::default()
        });
        let summary = harness
            .run_script_file(&data_file("rotations.txt"), TestSelection::All)
            .unwrap();
        assert!(summary.is_success(), "{algorithm}: {summary}");
        assert_eq!(summary.passed, 9, "{algorithm}");
        assert_eq!(started_tests(&harness), vec![0, 1, 2, 3, 4, 5]);
    }
}

#[test]
fn construct_rotate_expect_scenario() {
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", "t 0\nn 1100\nr 0 4 1\ne 0110\n", TestSelection::All);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 0);
    let rendered: Vec<String> = harness.transcript().iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["\nRunning test #0...", "1100", " --> inline at line 4: PASS"]);
}

#[test]
fn selected_test_runs_alone() {
    let mut harness = Harness::default();
    let summary = harness
        .run_script_file(&data_file("rotations.txt"), TestSelection::Only(3))
        .unwrap();
    assert_eq!(started_tests(&harness), vec![3]);
    assert_eq!(summary.passed, 2);
}

#[test]
fn unknown_selection_runs_nothing() {
    let mut harness = Harness::default();
    let summary = harness
        .run_script_file(&data_file("rotations.txt"), TestSelection::Only(99))
        .unwrap();
    assert_eq!(summary.passed + summary.failed, 0);
    assert!(harness.transcript().is_empty());
}

#[test]
fn failures_are_reported_and_execution_continues() {
    let script = "t 0\nn 1010\ne 1011\ne 101\nr 0 4 1\ne 0101\n";
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", script, TestSelection::All);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 2);
    let kinds: Vec<MismatchKind> = harness
        .transcript()
        .failures()
        .filter_map(|failure| match failure {
            Failure::Mismatch { kind, .. } => Some(*kind),
            Failure::SuiteError { .. } => None,
        })
        .collect();
    assert_eq!(kinds, vec![MismatchKind::Content, MismatchKind::Size]);
}

#[test]
fn bad_bounds_are_suite_errors_and_skip_the_rotation() {
    let script = "t 0\nn 1010\nr 2 3 1\ne 1010\n";
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", script, TestSelection::All);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.passed, 1);
    let failure = harness.transcript().failures().next().cloned();
    assert_eq!(
        failure,
        Some(Failure::SuiteError {
            bit_offset: 2,
            bit_length: 3,
            subject_length: 4
        })
    );
    let rendered = harness.transcript().findings().next().map(ToString::to_string);
    assert!(rendered.is_some_and(|text| text.contains("TEST SUITE ERROR") && text.contains("line 3")));
}

#[test]
fn unknown_and_malformed_lines_do_not_stop_the_script() {
    let script = "t 0\nn 1100\nq what\nr 0 4\nr 0 four 1\n   \n# fine\nr 0 4 1\ne 0110\n";
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", script, TestSelection::All);
    assert!(summary.is_success());
    assert_eq!(summary.passed, 1);
    let diagnostics: Vec<&Entry> = harness
        .transcript()
        .iter()
        .filter(|entry| matches!(entry, Entry::UnknownCommand { .. } | Entry::MalformedCommand { .. }))
        .collect();
    assert_eq!(diagnostics.len(), 3);
    assert!(matches!(diagnostics[0], Entry::UnknownCommand { line: 3, .. }));
    assert!(matches!(diagnostics[1], Entry::MalformedCommand { line: 4, .. }));
    assert!(matches!(diagnostics[2], Entry::MalformedCommand { line: 5, .. }));
}

#[test]
fn unknown_commands_are_reported_even_in_skipped_tests() {
    let script = "t 0\nz\nn 1\nt 1\nn 0\ne 0\n";
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", script, TestSelection::Only(1));
    assert_eq!(summary.passed, 1);
    assert!(matches!(harness.transcript()[0], Entry::UnknownCommand { line: 2, .. }));
}

#[test]
fn commands_before_the_first_test_are_skipped() {
    let script = "n 1\ne 0\nt 0\nn 1\ne 1\n";
    let mut harness = Harness::default();
    let summary = harness.run_script("inline", script, TestSelection::All);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn summaries_cover_a_single_run() {
    let mut harness = Harness::default();
    let first = harness.run_script("one", "t 0\nn 1\ne 0\n", TestSelection::All);
    let second = harness.run_script("two", "t 0\nn 1\ne 1\n", TestSelection::All);
    assert_eq!(first.failed, 1);
    assert_eq!(second.failed, 0);
    assert_eq!(harness.transcript().summary().to_string(), "1 passed, 1 failed");
}

#[test]
fn entries_before_a_contract_violation_reach_the_sink() {
    let reported = Rc::new(RefCell::new(Vec::new()));
    let mut harness = Harness::default();
    let sink = Rc::clone(&reported);
    harness.report_to(move |entry| sink.borrow_mut().push(entry.to_string()));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        harness.run_script("inline", "t 0\nn 1100\ne 1111\nn 10x1\n", TestSelection::All)
    }));
    assert!(outcome.is_err());
    let reported = reported.borrow();
    assert_eq!(reported.len(), 4);
    assert_eq!(reported[0], "\nRunning test #0...");
    assert_eq!(reported[1], "1100");
    assert_eq!(reported[2], "1100 expect bits=1111");
    assert!(reported[3].starts_with(" --> inline at line 3: FAIL"));
}

#[test]
#[should_panic(expected = "malformed bitstring")]
fn bad_bitstring_is_a_contract_violation() {
    Harness::default().run_script("inline", "t 0\nn 10201\n", TestSelection::All);
}

#[test]
#[should_panic(expected = "no bit vector under test")]
fn rotating_without_a_subject_is_a_contract_violation() {
    Harness::default().run_script("inline", "t 0\nr 0 0 0\n", TestSelection::All);
}

#[test]
fn missing_script_is_an_error() {
    let error = Harness::default()
        .run_script_file(&data_file("does-not-exist.txt"), TestSelection::All)
        .unwrap_err();
    assert!(matches!(error, ScriptError::Read { .. }));
    assert!(error.to_string().contains("does-not-exist.txt"));
}

#[test]
fn command_errors_name_the_argument() {
    let error = everybit::Command::parse("r 1 x 2").unwrap_err();
    assert!(matches!(error, CommandError::InvalidNumber { argument: "length", .. }));
    assert!(error.to_string().contains("length"));
}
