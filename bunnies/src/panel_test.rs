#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_count_field() {
    let panel = ControlPanel::new();
    let count = panel.field(FieldId::Count);
    assert_eq!(count.kind, FieldKind::Number);
    assert_eq!(count.label, "Bunnies No.");
    assert_eq!(count.value, 12.0);
    assert_eq!((count.min, count.max, count.step), (1.0, 64.0, 1.0));
    assert_eq!(panel.count(), 12);
}

#[test]
fn default_scale_field() {
    let panel = ControlPanel::new();
    let scale = panel.field(FieldId::Scale);
    assert_eq!(scale.kind, FieldKind::Range);
    assert_eq!(scale.label, "Bunny Size");
    assert_eq!(scale.value, 1.2);
    assert_eq!((scale.min, scale.max, scale.step), (1.0, 1.6, 0.1));
}

#[test]
fn default_rotation_field() {
    let panel = ControlPanel::new();
    let rotation = panel.field(FieldId::Rotation);
    assert_eq!(rotation.kind, FieldKind::Range);
    assert_eq!(rotation.label, "Bunny Rotation");
    assert_eq!(rotation.value, 0.0);
    assert_eq!((rotation.min, rotation.max, rotation.step), (-1.0, 1.0, 0.1));
}

#[test]
fn fields_are_in_display_order() {
    let panel = ControlPanel::new();
    let ids: Vec<FieldId> = panel.fields().iter().map(|f| f.id).collect();
    assert_eq!(ids, FieldId::ALL.to_vec());
}

#[test]
fn defaults_reflect_current_scale_and_rotation() {
    let mut panel = ControlPanel::new();
    panel.set_field(FieldId::Scale, 1.5);
    panel.set_field(FieldId::Rotation, -0.3);
    assert_eq!(panel.defaults(), EntityDefaults { scale: 1.5, rotation: -0.3 });
}

// =============================================================
// set_field
// =============================================================

#[test]
fn set_field_range_clamps_high() {
    let mut panel = ControlPanel::new();
    assert_eq!(panel.set_field(FieldId::Scale, 3.0), 1.6);
    assert_eq!(panel.scale(), 1.6);
}

#[test]
fn set_field_range_clamps_low() {
    let mut panel = ControlPanel::new();
    assert_eq!(panel.set_field(FieldId::Rotation, -7.0), -1.0);
    assert_eq!(panel.rotation(), -1.0);
}

#[test]
fn set_field_count_stores_verbatim() {
    let mut panel = ControlPanel::new();
    assert_eq!(panel.set_field(FieldId::Count, 30.0), 30.0);
    assert_eq!(panel.count(), 30);
}

#[test]
fn set_field_does_not_touch_other_fields() {
    let mut panel = ControlPanel::new();
    panel.set_field(FieldId::Scale, 1.4);
    assert_eq!(panel.count(), 12);
    assert_eq!(panel.rotation(), 0.0);
}

// =============================================================
// ControlField helpers
// =============================================================

#[test]
fn contains_is_inclusive() {
    let panel = ControlPanel::new();
    let count = panel.field(FieldId::Count);
    assert!(count.contains(1.0));
    assert!(count.contains(64.0));
    assert!(!count.contains(0.0));
    assert!(!count.contains(65.0));
}

#[test]
fn coerce_parses_trimmed_numbers() {
    let panel = ControlPanel::new();
    assert_eq!(panel.field(FieldId::Scale).coerce(" 1.3 ").unwrap(), 1.3);
    assert_eq!(panel.field(FieldId::Rotation).coerce("-0.5").unwrap(), -0.5);
}

#[test]
fn coerce_rejects_garbage() {
    let panel = ControlPanel::new();
    let err = panel.field(FieldId::Count).coerce("lots").unwrap_err();
    assert_eq!(err, ControlError::InvalidNumber { field: FieldId::Count, raw: "lots".into() });
}

#[test]
fn coerce_rejects_empty_and_non_finite() {
    let panel = ControlPanel::new();
    let field = panel.field(FieldId::Scale);
    assert!(field.coerce("").is_err());
    assert!(field.coerce("NaN").is_err());
    assert!(field.coerce("inf").is_err());
}

// =============================================================
// FieldId
// =============================================================

#[test]
fn field_id_parses_names_and_alias() {
    assert_eq!("count".parse::<FieldId>().unwrap(), FieldId::Count);
    assert_eq!("amount".parse::<FieldId>().unwrap(), FieldId::Count);
    assert_eq!("scale".parse::<FieldId>().unwrap(), FieldId::Scale);
    assert_eq!("rotation".parse::<FieldId>().unwrap(), FieldId::Rotation);
}

#[test]
fn field_id_unknown_errors() {
    let err = "size".parse::<FieldId>().unwrap_err();
    assert_eq!(err, ControlError::UnknownField("size".into()));
}

#[test]
fn field_id_display_matches_serde() {
    for id in FieldId::ALL {
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}

#[test]
fn field_kind_serde_lowercase() {
    assert_eq!(serde_json::to_string(&FieldKind::Range).unwrap(), "\"range\"");
    assert_eq!(serde_json::to_string(&FieldKind::Number).unwrap(), "\"number\"");
}
