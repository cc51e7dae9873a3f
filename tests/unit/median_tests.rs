use stateful_calc::commands::Median;

#[test]
fn odd_count_takes_the_middle_value() {
    assert_eq!(Median::of(&[17, 30, 29, 23, 20]).to_string(), "23");
}

#[test]
fn even_count_averages_the_middle_pair() {
    assert_eq!(Median::of(&[17, 30, 29, 23, 20, 24]).to_string(), "23.5");
    assert_eq!(Median::of(&[1, 3]).to_string(), "2");
}

#[test]
fn empty_input_is_zero() {
    assert_eq!(Median::of(&[]).to_string(), "0");
    assert!(Median::of(&[]).as_f64().abs() < f64::EPSILON);
}

#[test]
fn single_value() {
    assert_eq!(Median::of(&[-7]).to_string(), "-7");
}

#[test]
fn negative_halves_keep_their_sign() {
    assert_eq!(Median::of(&[-1, -2]).to_string(), "-1.5");
    assert_eq!(Median::of(&[-1, 0]).to_string(), "-0.5");
}

#[test]
fn extreme_values_do_not_overflow() {
    assert_eq!(Median::of(&[i64::MAX, i64::MAX]).to_string(), i64::MAX.to_string());
    assert_eq!(
        Median::of(&[i64::MAX, i64::MAX - 1]).to_string(),
        format!("{}.5", i64::MAX - 1)
    );
}

#[test]
fn input_order_does_not_matter() {
    assert_eq!(Median::of(&[9, 4, 5]), Median::of(&[4, 5, 9]));
}

#[test]
fn as_f64_matches_display() {
    assert!((Median::of(&[17, 30, 29, 23, 20, 24]).as_f64() - 23.5).abs() < f64::EPSILON);
}
