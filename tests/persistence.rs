#![cfg(feature = "serde")]

use orioto_dsp::{
    curve::{Curve, Point},
    edit::DragTarget,
    preset::{StoredBank, StoredNode},
    session::CurveSession,
    CurveError, PresetError, ShaperConfig,
};

#[test]
fn session_survives_a_json_round_trip() {
    let (mut session, _reader) = CurveSession::new(ShaperConfig::default()).unwrap();
    session.create_preset("Soft", 4).unwrap();
    session.pointer_down(DragTarget::end_point(1)).unwrap();
    session.pointer_drag(Point::new(-0.4, -0.2)).unwrap();
    session.pointer_up().unwrap();
    session.store_preset("Soft");

    let json = serde_json::to_string_pretty(&session.to_stored()).unwrap();
    let stored: StoredBank = serde_json::from_str(&json).unwrap();
    let (bank, index, active) = stored.load().unwrap();

    assert_eq!(index, 1);
    assert_eq!(bank.names().collect::<Vec<_>>(), vec!["Bypass", "Soft"]);
    assert_eq!(active.len(), 4);

    let (restored, _reader) =
        CurveSession::with_state(ShaperConfig::default(), bank, index, active).unwrap();
    for i in 0..=20 {
        let x = -1.0 + i as f32 / 10.0;
        assert!((restored.evaluate(x) - session.evaluate(x)).abs() < 1e-5);
    }
}

#[test]
fn handles_are_written_as_absolute_points() {
    let curve = Curve::bypass();
    let stored: Vec<StoredNode> = curve.nodes().iter().map(StoredNode::from).collect();
    let json = serde_json::to_value(&stored).unwrap();

    // The middle node sits at the origin, so absolute equals offset there;
    // the last node shows the difference.
    let last_in_x = json[2]["control_in"]["x"].as_f64().unwrap();
    assert!((last_in_x - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(json[2]["end_point"]["x"].as_f64(), Some(1.0));
}

#[test]
fn corrupt_files_are_rejected() {
    let json = r#"{
        "preset_index": 0,
        "active": [
            { "end_point": { "x": -1.0, "y": 0.0 },
              "control_in": { "x": -1.0, "y": 0.0 },
              "control_out": { "x": -1.0, "y": 0.0 } },
            { "end_point": { "x": 0.5, "y": 0.0 },
              "control_in": { "x": 0.5, "y": 0.0 },
              "control_out": { "x": 0.5, "y": 0.0 } }
        ]
    }"#;
    let stored: StoredBank = serde_json::from_str(json).unwrap();
    assert_eq!(stored.presets.len(), 0);
    assert_eq!(
        stored.load().unwrap_err(),
        PresetError::InvalidCurve(CurveError::DomainEnd { x: 0.5 })
    );
}

#[test]
fn config_loads_with_defaults_for_missing_fields() {
    let config: ShaperConfig = serde_json::from_str(r#"{ "table_resolution": 2048 }"#).unwrap();
    assert_eq!(config.table_resolution, 2048);
    assert_eq!(config.publish_queue, ShaperConfig::default().publish_queue);
    assert_eq!(config.validate(), Ok(()));
}
