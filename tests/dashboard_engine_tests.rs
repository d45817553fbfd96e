use statboard::ChartError;
use statboard::api::{
    BAR_TITLE_OVERALL, DashboardConfig, DashboardEngine, RESET_BUTTON_LABEL,
    SCATTER_TITLE_BRUSH, SCATTER_TITLE_MULTI_CLICK, SUMMARY_PREFIX,
};
use statboard::core::{Dataset, RecordId, StatKey, Viewport};
use statboard::interaction::{BrushRect, InteractionMode, SelectionEvent};
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

/// Canvas position of a record's scatter point.
fn canvas_point(engine: &DashboardEngine<NullRenderer>, id: &str) -> (f64, f64) {
    let scatter = engine.layout().scatter;
    let point = engine
        .projection()
        .points
        .iter()
        .find(|point| point.id.as_str() == id)
        .expect("record is projected");
    (scatter.x + point.cx, scatter.y + point.cy)
}

fn selected(engine: &DashboardEngine<NullRenderer>) -> Vec<&str> {
    engine.selection().iter().map(RecordId::as_str).collect()
}

#[test]
fn engine_starts_with_overall_views() {
    let engine = engine();

    assert!(engine.selection().is_empty());
    assert_eq!(engine.mode(), InteractionMode::Brush);
    assert_eq!(engine.views().bar.title, BAR_TITLE_OVERALL);
    assert_eq!(engine.views().radar.domain.max, 100.0);
    assert_eq!(engine.projection().points.len(), 12);
    assert_eq!(engine.bar_heights(), &[0.0; 6]);
    assert!(engine.is_animating());
}

#[test]
fn bars_settle_on_mean_values() {
    let mut engine = engine();
    let duration = engine.config().bar_transition_ms;

    assert!(engine.advance_animations(duration / 2.0));
    assert!(!engine.advance_animations(duration));

    let expected: Vec<f64> = engine
        .views()
        .bar
        .entries
        .iter()
        .map(|entry| entry.value.unwrap_or(0.0))
        .collect();
    assert_eq!(engine.bar_heights(), expected.as_slice());
}

#[test]
fn clicking_a_point_selects_it_and_enters_multi_click() {
    let mut engine = engine();
    let (x, y) = canvas_point(&engine, "rec_3_Mewtwo");

    let transition = engine
        .click_at(x, y)
        .expect("click applies")
        .expect("point click transitions");

    assert_eq!(selected(&engine), vec!["rec_3_Mewtwo"]);
    assert_eq!(transition.mode_after, InteractionMode::MultiClick);
    assert_eq!(engine.views().summary.text, "Mewtwo");
    assert_eq!(engine.views().radar.domain.max, 175.0);
}

#[test]
fn overlapping_points_resolve_to_first_record() {
    let mut engine = engine();
    let (x, y) = canvas_point(&engine, "rec_5_Cyndaquil");

    engine.click_at(x, y).expect("click applies");

    assert_eq!(selected(&engine), vec!["rec_1_Charmander"]);
}

#[test]
fn background_click_depends_on_mode() {
    let mut engine = engine();
    let scatter = engine.layout().scatter;
    let empty_spot = (scatter.right() - 2.0, scatter.y + 2.0);

    let brushed_nothing = engine
        .click_at(empty_spot.0, empty_spot.1)
        .expect("background click")
        .expect("empty brush in brush mode");
    assert_eq!(brushed_nothing.selection_len, 0);
    assert!(!brushed_nothing.brush_cleared);

    engine
        .point_click_id(&RecordId::new("rec_0_Bulbasaur"))
        .expect("select");
    engine
        .point_click_id(&RecordId::new("rec_2_Squirtle"))
        .expect("select");
    let cleared = engine
        .click_at(empty_spot.0, empty_spot.1)
        .expect("background click")
        .expect("clears in multi-click");

    assert_eq!(cleared.selection_len, 0);
    assert_eq!(engine.mode(), InteractionMode::Brush);
    assert_eq!(engine.views().bar.title, BAR_TITLE_OVERALL);
}

#[test]
fn empty_click_clears_brushed_selection() {
    let mut engine = engine();
    let scatter = engine.layout().scatter;
    let everything = BrushRect::new(0.0, 0.0, scatter.width, scatter.height).expect("rect");
    engine.brush_end(Some(everything)).expect("brush");
    assert_eq!(engine.selection().len(), 12);

    let cleared = engine
        .click_at(scatter.right() - 2.0, scatter.y + 2.0)
        .expect("background click")
        .expect("click clears the brush");

    assert!(cleared.brush_cleared);
    assert_eq!(cleared.selection_len, 0);
    assert!(engine.selection().is_empty());
    assert_eq!(engine.selection_state().active_brush(), None);
    assert_eq!(engine.mode(), InteractionMode::Brush);
    assert_eq!(engine.views().bar.title, BAR_TITLE_OVERALL);
}

#[test]
fn drags_are_ignored_in_multi_click_mode() {
    let mut engine = engine();
    engine
        .point_click_id(&RecordId::new("rec_0_Bulbasaur"))
        .expect("select");
    let scatter = engine.layout().scatter;

    let outcome = engine
        .brush_between((scatter.x, scatter.y), (scatter.right(), scatter.bottom()))
        .expect("drag");

    assert_eq!(outcome, None);
    assert_eq!(engine.mode(), InteractionMode::MultiClick);
    assert_eq!(selected(&engine), vec!["rec_0_Bulbasaur"]);

    let everything = BrushRect::new(0.0, 0.0, scatter.width, scatter.height).expect("rect");
    engine.brush_end(Some(everything)).expect("direct brush");
    assert_eq!(engine.mode(), InteractionMode::Brush);
    assert_eq!(engine.selection().len(), 12);
}

#[test]
fn clicks_outside_interactive_regions_are_ignored() {
    let mut engine = engine();
    let outcome = engine.click_at(5.0, 890.0).expect("click");
    assert_eq!(outcome, None);
}

#[test]
fn reset_button_click_resets() {
    let mut engine = engine();
    engine
        .point_click_id(&RecordId::new("rec_7_Lugia"))
        .expect("select");

    let button = engine.layout().reset_button;
    let transition = engine
        .click_at(button.x + 10.0, button.y + 10.0)
        .expect("reset applies")
        .expect("reset transitions");

    assert_eq!(transition.mode_before, InteractionMode::MultiClick);
    assert!(engine.selection().is_empty());
}

#[test]
fn brush_between_clamps_and_selects_strong_attackers() {
    let mut engine = engine();
    let scatter = engine.layout().scatter;
    let x_from = scatter.x + engine.projection().x_scale.apply(100.0);

    engine
        .brush_between(
            (x_from, scatter.y - 40.0),
            (scatter.right() + 40.0, scatter.bottom() + 40.0),
        )
        .expect("brush applies");

    assert_eq!(selected(&engine), vec!["rec_3_Mewtwo", "rec_11_Rayquaza"]);
    let brush = engine
        .selection_state()
        .active_brush()
        .expect("brush remains drawn");
    assert_eq!(brush.y0, 0.0);
    assert_eq!(brush.x1, scatter.width);
    assert_eq!(brush.y1, scatter.height);
    assert_eq!(engine.views().bar.title, "Avg Stats (Selected: 2)");
}

#[test]
fn zero_area_drag_clears_brush() {
    let mut engine = engine();
    engine
        .brush_end(Some(BrushRect::new(0.0, 0.0, 1000.0, 1000.0).expect("rect")))
        .expect("brush applies");
    assert_eq!(engine.selection().len(), 12);

    let scatter = engine.layout().scatter;
    let transition = engine
        .brush_between((scatter.x + 30.0, scatter.y + 30.0), (scatter.x + 30.0, scatter.y + 90.0))
        .expect("brush applies")
        .expect("transition");

    assert!(transition.brush_cleared);
    assert!(engine.selection().is_empty());
    assert_eq!(engine.selection_state().active_brush(), None);
}

#[test]
fn unknown_record_click_leaves_engine_untouched() {
    let mut engine = engine();
    engine
        .point_click_id(&RecordId::new("rec_0_Bulbasaur"))
        .expect("select");
    let before = engine.snapshot();

    let result = engine.point_click_id(&RecordId::new("rec_99_Missingno"));

    assert!(matches!(result, Err(ChartError::UnknownRecord(_))));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn handle_event_accepts_raw_selection_events() {
    let mut engine = engine();
    engine
        .handle_event(SelectionEvent::PointClick(RecordId::new("rec_4_Chikorita")))
        .expect("click");
    engine
        .handle_event(SelectionEvent::PointClick(RecordId::new("rec_8_Treecko")))
        .expect("click");

    assert_eq!(engine.views().summary.text, "Chikorita, Treecko");
    let hp = engine.views().bar.entries[0].value.expect("hp mean");
    assert!((hp - 42.5).abs() <= 1e-9);
    assert_eq!(engine.views().bar.entries[0].key, StatKey::Hp);
}

#[test]
fn render_reaches_renderer_with_full_frame() {
    let mut engine = engine();
    engine.advance_animations(1_000.0);
    engine.render().expect("render");

    let renderer = engine.renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_circle_count(), 12);
    let frame = renderer.last_frame.as_ref().expect("frame kept");

    assert!(frame.find_text(SCATTER_TITLE_BRUSH).is_some());
    assert!(frame.find_text(RESET_BUTTON_LABEL).is_some());
    assert_eq!(
        frame
            .find_text(SUMMARY_PREFIX)
            .map(|text| text.text.as_str()),
        Some("selected: None")
    );
    assert!(frame.find_text("Gen 1").is_some());
    assert!(frame.find_text("70.0").is_some());
    assert!(frame.find_text("Average Value").is_some());
    assert!(frame.circles.iter().all(|circle| circle.stroke.is_none()));
}

#[test]
fn selected_points_render_larger_with_outline() {
    let mut engine = engine();
    engine
        .point_click_id(&RecordId::new("rec_10_Mudkip"))
        .expect("select");
    let frame = engine.build_render_frame().expect("frame");

    let outlined: Vec<_> = frame
        .circles
        .iter()
        .filter(|circle| circle.stroke.is_some())
        .collect();
    assert_eq!(outlined.len(), 1);
    assert_eq!(outlined[0].radius, engine.config().selected_point_radius);
    assert_eq!(outlined[0].fill_color.alpha, 1.0);
    assert!(
        frame
            .circles
            .iter()
            .filter(|circle| circle.stroke.is_none())
            .all(|circle| circle.fill_color.alpha < 1.0)
    );

    assert!(frame.find_text(SCATTER_TITLE_MULTI_CLICK).is_some());
    assert!(frame.find_text("Gen 1").is_none());
    assert!(frame.find_text("Selected Stats (Count: 1)").is_some());
}

#[test]
fn brush_rectangle_is_drawn_only_while_active() {
    let mut engine = engine();
    let without = engine.build_render_frame().expect("frame").rects.len();

    engine
        .brush_end(Some(BrushRect::new(10.0, 10.0, 200.0, 200.0).expect("rect")))
        .expect("brush applies");
    let with = engine.build_render_frame().expect("frame").rects.len();
    assert_eq!(with, without + 1);

    engine.reset().expect("reset");
    let after_reset = engine.build_render_frame().expect("frame").rects.len();
    assert_eq!(after_reset, without);
}

#[test]
fn render_frame_is_deterministic() {
    let mut engine = engine();
    engine
        .point_click_id(&RecordId::new("rec_9_Torchic"))
        .expect("select");

    let first = engine.build_render_frame().expect("first frame");
    let second = engine.build_render_frame().expect("second frame");
    assert_eq!(first, second);
    first.validate().expect("frame is valid");
}
