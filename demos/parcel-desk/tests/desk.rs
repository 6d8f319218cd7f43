//! Step-chain acceptance tests for the parcel desk.
//!
//! Each test declares its scenario as a Given/When/Then chain and prints the
//! step log to the captured test output.

use parcel_desk::{DeskError, ParcelDesk};
use rstest::{fixture, rstest};
use step_chain::{AggregateFailure, RecordingReporter, StepKind, ThrownError, given};

#[fixture]
fn desk() -> ParcelDesk {
    ParcelDesk::with_capacity(2)
}

#[rstest]
fn collecting_a_parcel_empties_the_shelf(desk: ParcelDesk) -> Result<(), AggregateFailure> {
    let collected = std::cell::RefCell::new(None);

    given("an empty desk", || assert!(desk.is_empty()))
        .and("a parcel labelled A-1 is checked in", || desk.check_in("A-1"))
        .when("the customer collects A-1", || {
            collected.replace(Some(desk.collect("A-1")?));
            Ok::<(), DeskError>(())
        })
        .then("the customer holds A-1", || {
            assert_eq!(collected.borrow().as_deref(), Some("A-1"));
        })
        .and("the shelf is empty", || assert!(desk.is_empty()))
        .execute_to_console()
}

#[rstest]
fn checking_in_a_duplicate_is_refused(desk: ParcelDesk) -> Result<(), AggregateFailure> {
    let thrown = ThrownError::new();

    given("a parcel labelled B-7 is checked in", || desk.check_in("B-7"))
        .when("B-7 is checked in again", || {
            thrown.capture(|| desk.check_in("B-7"));
        })
        .then("the desk refuses it", || {
            assert_eq!(
                thrown.message().as_deref(),
                Some("parcel B-7 is already checked in")
            );
        })
        .and("only one B-7 is on the shelf", || assert_eq!(desk.len(), 1))
        .execute_to_console()
}

#[rstest]
fn checking_in_within_capacity_raises_nothing(desk: ParcelDesk) -> Result<(), AggregateFailure> {
    let thrown = ThrownError::new();

    given("a desk with room for two parcels", || {})
        .when("two parcels are checked in", || {
            thrown.capture(|| {
                desk.check_in("C-1")?;
                desk.check_in("C-2")
            });
        })
        .then("no error is raised", || thrown.assert_none())
        .and("both parcels are shelved", || {
            assert!(desk.holds("C-1") && desk.holds("C-2"));
        })
        .execute_to_console()
}

#[rstest]
fn every_broken_expectation_is_reported(desk: ParcelDesk) {
    let mut reporter = RecordingReporter::new("every broken expectation is reported");

    let result = given("a full desk", || {
        desk.check_in("D-1")?;
        desk.check_in("D-2")
    })
    .when("a third parcel is checked in", || desk.check_in("D-3"))
    .then("the shelf holds three parcels", || assert_eq!(desk.len(), 3))
    .and("D-3 is waiting", || assert!(desk.holds("D-3")))
    .execute(&mut reporter);

    let Err(aggregate) = result else {
        panic!("an over-full desk must fail the scenario");
    };
    let kinds: Vec<_> = aggregate
        .failures()
        .iter()
        .map(|step| (step.kind(), step.failure().kind_name()))
        .collect();
    assert_eq!(
        kinds,
        [
            (StepKind::When, "DeskError"),
            (StepKind::Then, "panic"),
            (StepKind::And, "panic"),
        ]
    );
    assert!(
        reporter
            .lines()
            .iter()
            .any(|line| line == "\tWHEN a third parcel is checked in\t-- FAIL - DeskError")
    );
}
