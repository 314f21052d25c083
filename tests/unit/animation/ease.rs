use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in [Ease::Linear, Ease::InOutCubic] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
    assert_eq!(ease_out_back(0.0), 0.0);
    assert_eq!(ease_out_back(1.0), 1.0);
}

#[test]
fn monotonic_spot_check() {
    for ease in [Ease::Linear, Ease::InOutCubic] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn in_out_cubic_matches_closed_form() {
    assert!((in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
    assert!((in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    assert!((in_out_cubic(0.75) - 0.9375).abs() < 1e-12);
}

#[test]
fn ease_out_back_overshoots_before_settling() {
    let peak = (1..100)
        .map(|i| ease_out_back(i as f64 / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!(peak < 1.2);
}

#[test]
fn inputs_are_clamped() {
    assert_eq!(Ease::Linear.apply(-3.0), 0.0);
    assert_eq!(Ease::InOutCubic.apply(4.0), 1.0);
    assert_eq!(ease_out_back(2.0), 1.0);
}

#[test]
fn reveal_gate_absent_before_start_and_full_at_end() {
    assert_eq!(reveal_progress(0.0, 1.0, 2.0), None);
    assert_eq!(reveal_progress(1.0, 1.0, 2.0), None);
    let early = reveal_progress(1.0 + 1e-4, 1.0, 2.0).unwrap();
    assert!(early > 0.0 && early < 1e-3);
    assert_eq!(reveal_progress(3.0, 1.0, 2.0), Some(1.0));
    assert_eq!(reveal_progress(30.0, 1.0, 2.0), Some(1.0));
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutCubic).unwrap(),
        "\"in_out_cubic\""
    );
    let e: Ease = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(e, Ease::Linear);
}
