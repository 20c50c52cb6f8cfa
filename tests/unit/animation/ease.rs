use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [Ease::Linear, Ease::In, Ease::Out, Ease::InOut] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn cubic_curves_match_closed_forms() {
    assert!((Ease::In.apply(0.5) - 0.125).abs() < 1e-12);
    assert!((Ease::Out.apply(0.5) - 0.875).abs() < 1e-12);
    assert!((Ease::InOut.apply(0.25) - 0.0625).abs() < 1e-12);
    assert!((Ease::InOut.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn apply_clamps_out_of_range_progress() {
    assert_eq!(Ease::Out.apply(-1.0), 0.0);
    assert_eq!(Ease::In.apply(3.0), 1.0);
}

#[test]
fn phase_maps_inclusive_frame_ranges() {
    assert_eq!(Ease::Linear.phase(12, 12, 16), 0.0);
    assert_eq!(Ease::Linear.phase(14, 12, 16), 0.5);
    assert_eq!(Ease::Linear.phase(16, 12, 16), 1.0);
    assert_eq!(Ease::Out.phase(5, 5, 5), 1.0);
}
