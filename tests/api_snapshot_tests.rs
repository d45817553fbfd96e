use statboard::api::{
    DashboardConfig, DashboardEngine, ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot,
};
use statboard::core::{Dataset, RecordId, Viewport};
use statboard::interaction::{BrushRect, InteractionMode};
use statboard::render::NullRenderer;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/creatures_small.csv"
);

fn engine() -> DashboardEngine<NullRenderer> {
    let (dataset, _) = Dataset::from_csv_path(FIXTURE).expect("fixture loads");
    let config = DashboardConfig::new(Viewport::new(1280, 900));
    DashboardEngine::new(NullRenderer::default(), dataset, config).expect("engine init")
}

#[test]
fn snapshot_preserves_selection_order() {
    let mut engine = engine();
    for id in ["rec_7_Lugia", "rec_0_Bulbasaur", "rec_11_Rayquaza"] {
        engine.point_click_id(&RecordId::new(id)).expect("click");
    }

    let snapshot = engine.snapshot();
    let ids: Vec<&str> = snapshot.selection.iter().map(RecordId::as_str).collect();

    assert_eq!(ids, vec!["rec_7_Lugia", "rec_0_Bulbasaur", "rec_11_Rayquaza"]);
    assert_eq!(snapshot.mode, InteractionMode::MultiClick);
    assert_eq!(snapshot.active_brush, None);
    assert_eq!(snapshot.views.summary.text, "Lugia, Bulbasaur, Rayquaza");
}

#[test]
fn snapshot_json_roundtrip() {
    let mut engine = engine();
    engine
        .brush_end(Some(BrushRect::new(0.0, 0.0, 300.0, 587.0).expect("rect")))
        .expect("brush");
    engine.advance_animations(120.0);

    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    let restored = EngineSnapshot::from_json_compat_str(&json).expect("snapshot should parse");

    assert_eq!(restored, engine.snapshot());
    assert!(json.contains("\"schema_version\": 1"));
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let engine = engine();
    let snapshot = engine.snapshot();
    let bare = serde_json::to_string(&snapshot).expect("serialize bare snapshot");

    let restored = EngineSnapshot::from_json_compat_str(&bare).expect("bare snapshot parses");
    assert_eq!(restored, snapshot);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let engine = engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    let bumped = json.replacen(
        &format!("\"schema_version\": {ENGINE_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
        1,
    );

    let result = EngineSnapshot::from_json_compat_str(&bumped);
    assert!(result.is_err());
    assert!(EngineSnapshot::from_json_compat_str("[]").is_err());
}
