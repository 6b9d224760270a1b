// Host-side tests for parameter automation timelines.

use liquid_orb::audio::{Automation, AutomationEvent};
use liquid_orb::AudioError;

#[test]
fn holds_default_without_events() {
    let a = Automation::new(440.0);
    assert_eq!(a.value_at(0.0), 440.0);
    assert_eq!(a.value_at(1e6), 440.0);
}

#[test]
fn set_value_is_a_step() {
    let mut a = Automation::new(1.0);
    a.set_value_at_time(2.0, 1.0);
    assert_eq!(a.value_at(0.999), 1.0);
    assert_eq!(a.value_at(1.0), 2.0);
    assert_eq!(a.value_at(5.0), 2.0);
}

#[test]
fn exponential_ramp_follows_geometric_curve() {
    let mut a = Automation::new(0.0);
    a.set_value_at_time(800.0, 0.0);
    a.exponential_ramp_to_value_at_time(100.0, 0.5).unwrap();

    assert_eq!(a.value_at(0.0), 800.0);
    let mid = a.value_at(0.25);
    assert!((mid - 800.0 * 0.125_f32.sqrt()).abs() < 1e-2, "mid = {mid}");
    assert_eq!(a.value_at(0.5), 100.0);

    // Strictly decreasing across the ramp
    let mut prev = a.value_at(0.0);
    for i in 1..=50 {
        let v = a.value_at(i as f64 * 0.01);
        assert!(v < prev);
        prev = v;
    }
}

#[test]
fn exponential_ramp_to_zero_is_rejected() {
    let mut a = Automation::new(1.0);
    let err = a.exponential_ramp_to_value_at_time(0.0, 1.0).unwrap_err();
    assert_eq!(err, AudioError::ZeroRampTarget(0.0));
    assert!(a.events().is_empty());
}

#[test]
fn exponential_ramp_across_zero_holds_start_value() {
    let mut a = Automation::new(0.0);
    a.set_value_at_time(-1.0, 0.0);
    a.exponential_ramp_to_value_at_time(1.0, 1.0).unwrap();
    assert_eq!(a.value_at(0.5), -1.0);
    assert_eq!(a.value_at(1.0), 1.0);
}

#[test]
fn events_are_ordered_by_time_regardless_of_insertion_order() {
    let mut a = Automation::new(0.0);
    a.set_value_at_time(3.0, 3.0);
    a.set_value_at_time(1.0, 1.0);
    a.set_value_at_time(2.0, 2.0);

    let times: Vec<f64> = a
        .events()
        .iter()
        .map(|e| match *e {
            AutomationEvent::SetValue { time, .. } => time,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(times, vec![1.0, 2.0, 3.0]);
    assert_eq!(a.value_at(2.5), 2.0);
}
