//! Integration tests for resumption after induced channel failures.
//!
//! Each failure stops the session before the scheduled console action
//! happens; a fresh interpreter is then started against the same slot. The
//! scripted console rejects any re-prompt or repeated output, so a passing
//! run proves every line was read and written exactly once overall.

use stateful_calc::persistence::DurableSlot;

use super::test_helpers::{
    expected_output, help_intro, help_topic, help_unknown, read, run_script,
    run_with_interruptions, write, Action,
};

fn script(parts: Vec<Vec<Action>>) -> Vec<Action> {
    parts.into_iter().flatten().collect()
}

/// A session touching every command and every checkpoint granularity.
fn full_tour() -> Vec<Action> {
    script(vec![
        vec![read("add"), read("5"), read("7"), write("12")],
        vec![
            read("median"),
            read("3"),
            read("4"),
            read("5"),
            read("9"),
            write("5"),
        ],
        vec![
            read("rand"),
            read("5"),
            write("420"),
            write("7058940"),
            write("528003995"),
            write("760714561"),
            write("1359476136"),
        ],
        vec![read("help")],
        help_intro(),
        vec![read("exit")],
        help_unknown(),
        vec![read("end")],
        vec![
            read("rand"),
            read("5"),
            write("1636897319"),
            write("2067722363"),
            write("1629379187"),
            write("264529365"),
            write("653888265"),
        ],
        vec![
            read("median"),
            read("3"),
            read("4"),
            read("5"),
            read("9"),
            write("5"),
        ],
        vec![read("help")],
        help_intro(),
        vec![read("exit")],
        help_unknown(),
        vec![read("add")],
        help_topic("Adds two integers"),
        vec![read("median")],
        help_topic("Computes the median of a list of integers"),
        vec![read("rand")],
        help_topic("Generates a sequence of pseudo-random numbers"),
        vec![read("end")],
        vec![
            read("end"),
            write("Unknown command, type help for the list of commands"),
            read("end"),
            write("Unknown command, type help for the list of commands"),
        ],
        vec![read("exit")],
    ])
}

#[test]
fn sum_interrupted_before_second_operand() {
    run_with_interruptions(
        vec![read("add"), read("15"), read("60"), write("75"), read("exit")],
        &[2],
    );
}

#[test]
fn median_interrupted_mid_sequence() {
    let script = vec![
        read("median"),
        read("3"),
        read("60"),
        read("50"),
        read("41"),
        write("50"),
        read("exit"),
    ];
    let (interrupted, _) = run_with_interruptions(script.clone(), &[1, 4]);
    let (uninterrupted, _) = run_script(script);
    assert_eq!(interrupted.written(), uninterrupted.written());
}

#[test]
fn median_interrupted_before_third_number_resumes_with_saved_values() {
    run_with_interruptions(
        vec![
            read("median"),
            read("3"),
            read("60"),
            read("50"),
            read("41"),
            write("50"),
            read("exit"),
        ],
        &[4],
    );
}

#[test]
fn random_sequence_interrupted_between_outputs() {
    run_with_interruptions(
        vec![
            read("rand"),
            read("2"),
            write("420"),
            write("7058940"),
            read("exit"),
        ],
        &[1, 3],
    );
}

#[test]
fn help_interrupted_at_every_step() {
    run_with_interruptions(
        script(vec![
            vec![read("help")],
            help_intro(),
            vec![read("end"), read("exit")],
        ]),
        &[0, 1, 2, 3, 4],
    );
}

#[test]
fn help_topic_block_interrupted_at_every_step() {
    run_with_interruptions(
        script(vec![
            vec![read("help")],
            help_intro(),
            vec![read("exit")],
            help_unknown(),
            vec![read("end"), read("exit")],
        ]),
        &[0, 1, 2, 3, 4, 5, 6, 7, 8],
    );
}

#[test]
fn full_tour_with_scattered_interruptions() {
    run_with_interruptions(full_tour(), &[1, 5, 9, 13, 17, 21, 25, 26]);
}

#[test]
fn full_tour_survives_a_failure_at_any_single_action() {
    let tour = full_tour();
    let expected = expected_output(&tour);

    for index in 0..tour.len() {
        let (console, _) = run_with_interruptions(tour.clone(), &[index]);
        assert_eq!(
            console.written(),
            expected.as_slice(),
            "output differs when failing at action {index}"
        );
    }
}

#[test]
fn full_tour_survives_a_failure_before_every_action() {
    let tour = full_tour();
    let schedule: Vec<usize> = (0..tour.len()).collect();
    let expected = expected_output(&tour);

    let (console, slot) = run_with_interruptions(tour, &schedule);
    assert_eq!(console.written(), expected.as_slice());

    assert!(slot.read().expect("read").is_empty(), "exit must clear state");
}
