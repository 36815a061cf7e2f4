//! Control Panel Tests
//!
//! Tests for:
//! - Knob construction, clamping and stepping
//! - ControlGroup vec3 helpers
//! - ControlPanel change tracking and error reporting
//! - Preset snapshot / JSON round trip

use glam::Vec3;

use apex::controls::{ControlGroup, ControlPanel, Knob};
use apex::errors::ApexError;

fn panel() -> ControlPanel {
    let mut panel = ControlPanel::new();
    panel
        .add_group(ControlGroup::vec3("Part 1 Position", Vec3::new(1.1, 1.0, -0.07), -10.0, 10.0, 0.1).unwrap())
        .unwrap();
    panel
        .add_group(ControlGroup::vec3("whole", Vec3::new(23.3, -3.0, 20.0), -50.0, 50.0, 0.1).unwrap())
        .unwrap();
    panel
}

// ============================================================================
// Knob
// ============================================================================

#[test]
fn knob_clamps_initial_value() {
    let knob = Knob::new("x", 120.0, -50.0, 50.0, 0.1).unwrap();
    assert_eq!(knob.value, 50.0);
}

#[test]
fn knob_rejects_bad_range_and_step() {
    assert!(matches!(
        Knob::new("x", 0.0, 1.0, -1.0, 0.1),
        Err(ApexError::InvalidKnob { .. })
    ));
    assert!(matches!(
        Knob::new("x", 0.0, -1.0, 1.0, 0.0),
        Err(ApexError::InvalidKnob { .. })
    ));
    assert!(Knob::new("x", 0.0, f32::NEG_INFINITY, 1.0, 0.1).is_err());
}

#[test]
fn knob_set_reports_change() {
    let mut knob = Knob::new("y", 0.0, -1.0, 1.0, 0.1).unwrap();
    assert!(knob.set(0.5));
    assert!(!knob.set(0.5));
    assert!(knob.set(3.0));
    assert_eq!(knob.value, 1.0);
    assert!(!knob.set(f32::NAN));
    assert_eq!(knob.value, 1.0);
}

#[test]
fn knob_keeps_unaligned_designer_value() {
    let knob = Knob::new("z", -0.07, -10.0, 10.0, 0.1).unwrap();
    assert_eq!(knob.value, -0.07);
}

#[test]
fn knob_nudge_moves_by_step() {
    let mut knob = Knob::new("x", 0.0, 0.0, 1.0, 0.25).unwrap();
    assert!(knob.nudge(2));
    assert_eq!(knob.value, 0.5);
    assert!(knob.nudge(-4));
    assert_eq!(knob.value, 0.0);
    assert!(!knob.nudge(-1));
}

// ============================================================================
// Panel
// ============================================================================

#[test]
fn panel_reads_vec3() {
    let panel = panel();
    assert_eq!(panel.vec3("whole"), Some(Vec3::new(23.3, -3.0, 20.0)));
    assert_eq!(panel.get("Part 1 Position", "z"), Some(-0.07));
    assert_eq!(panel.vec3("nope"), None);
}

#[test]
fn panel_tracks_changed_groups_in_order() {
    let mut panel = panel();
    assert!(!panel.has_changes());

    panel.set("whole", "x", 10.0).unwrap();
    panel.set("Part 1 Position", "y", 2.0).unwrap();
    panel.set("whole", "y", 1.0).unwrap();

    assert!(panel.has_changes());
    assert_eq!(panel.take_changes(), vec!["whole".to_string(), "Part 1 Position".to_string()]);
    assert!(!panel.has_changes());
    assert!(panel.take_changes().is_empty());
}

#[test]
fn panel_unchanged_value_is_not_a_change() {
    let mut panel = panel();
    let changed = panel.set("whole", "z", 20.0).unwrap();
    assert!(!changed);
    assert!(!panel.has_changes());
}

#[test]
fn panel_set_vec3_clamps() {
    let mut panel = panel();
    assert!(panel.set_vec3("Part 1 Position", Vec3::new(20.0, 0.0, -20.0)).unwrap());
    assert_eq!(panel.vec3("Part 1 Position"), Some(Vec3::new(10.0, 0.0, -10.0)));
}

#[test]
fn panel_unknown_names_are_errors() {
    let mut panel = panel();
    assert!(matches!(
        panel.set("missing", "x", 1.0),
        Err(ApexError::UnknownControlGroup(name)) if name == "missing"
    ));
    assert!(matches!(
        panel.set("whole", "w", 1.0),
        Err(ApexError::UnknownControl { .. })
    ));
    assert!(!panel.has_changes());
}

#[test]
fn panel_rejects_duplicate_group() {
    let mut panel = panel();
    let dup = ControlGroup::vec3("whole", Vec3::ZERO, -1.0, 1.0, 0.1).unwrap();
    assert!(matches!(panel.add_group(dup), Err(ApexError::DuplicateControlGroup(_))));
    assert_eq!(panel.groups().count(), 2);
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn preset_json_round_trip_marks_changes() {
    let mut source = panel();
    source.set_vec3("whole", Vec3::new(1.0, 2.0, 3.0)).unwrap();
    let json = source.preset_to_json().unwrap();

    let mut target = panel();
    target.apply_preset_json(&json).unwrap();
    assert_eq!(target.vec3("whole"), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(target.take_changes(), vec!["whole".to_string()]);
    assert_eq!(target.snapshot(), source.snapshot());
}

#[test]
fn preset_with_unknown_group_fails() {
    let mut panel = panel();
    let err = panel.apply_preset_json(r#"{ "ghost": { "x": 1.0 } }"#).unwrap_err();
    assert!(matches!(err, ApexError::UnknownControlGroup(_)));

    let err = panel.apply_preset_json("not json").unwrap_err();
    assert!(matches!(err, ApexError::JsonError(_)));
}
