use statboard::ChartError;
use statboard::core::RecordId;
use statboard::interaction::{
    BrushRect, InteractionMode, ScatterPoint, SelectionEvent, SelectionState, hit_test,
};

fn point(index: usize, id: &str, cx: f64, cy: f64) -> ScatterPoint {
    ScatterPoint {
        index,
        id: RecordId::new(id),
        cx,
        cy,
        radius: 4.0,
    }
}

fn grid() -> Vec<ScatterPoint> {
    vec![
        point(0, "a", 10.0, 10.0),
        point(1, "b", 50.0, 10.0),
        point(2, "c", 10.0, 50.0),
        point(3, "d", 90.0, 90.0),
    ]
}

fn ids(state: &SelectionState) -> Vec<&str> {
    state.selection().iter().map(RecordId::as_str).collect()
}

fn click(id: &str) -> SelectionEvent {
    SelectionEvent::PointClick(RecordId::new(id))
}

#[test]
fn initial_state_is_empty_brush_mode() {
    let state = SelectionState::default();
    assert!(state.is_empty());
    assert_eq!(state.mode(), InteractionMode::Brush);
    assert!(state.brush_enabled());
    assert_eq!(state.active_brush(), None);
}

#[test]
fn brush_selects_points_inside_in_dataset_order() {
    let points = grid();
    let mut state = SelectionState::default();
    let rect = BrushRect::new(60.0, 60.0, 0.0, 0.0).expect("valid rect");

    let transition = state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies")
        .expect("brush always transitions");

    assert_eq!(ids(&state), vec!["a", "b", "c"]);
    assert_eq!(transition.selection_len, 3);
    assert_eq!(transition.mode_after, InteractionMode::Brush);
    assert!(!transition.brush_cleared);
    assert_eq!(state.active_brush(), Some(rect));
}

#[test]
fn brush_edges_are_inclusive() {
    let points = grid();
    let mut state = SelectionState::default();
    let rect = BrushRect::new(10.0, 10.0, 50.0, 10.0).expect("degenerate rect");

    state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies");

    assert_eq!(ids(&state), vec!["a", "b"]);
}

#[test]
fn empty_brush_clears_selection() {
    let points = grid();
    let mut state = SelectionState::default();
    let rect = BrushRect::new(0.0, 0.0, 100.0, 100.0).expect("valid rect");
    state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies");

    let transition = state
        .apply(&SelectionEvent::BrushEnd(None), &points)
        .expect("empty brush applies")
        .expect("transition");

    assert!(state.is_empty());
    assert!(transition.brush_cleared);
    assert_eq!(state.active_brush(), None);
}

#[test]
fn first_click_replaces_selection_and_enters_multi_click() {
    let points = grid();
    let mut state = SelectionState::default();
    let rect = BrushRect::new(0.0, 0.0, 100.0, 100.0).expect("valid rect");
    state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies");

    let transition = state
        .apply(&click("c"), &points)
        .expect("click applies")
        .expect("transition");

    assert_eq!(ids(&state), vec!["c"]);
    assert_eq!(state.mode(), InteractionMode::MultiClick);
    assert!(transition.mode_changed());
    assert!(transition.brush_cleared);
    assert!(!state.brush_enabled());
}

#[test]
fn multi_click_toggles_and_keeps_insertion_order() {
    let points = grid();
    let mut state = SelectionState::default();
    for id in ["b", "d", "a"] {
        state.apply(&click(id), &points).expect("click applies");
    }
    assert_eq!(ids(&state), vec!["b", "d", "a"]);

    state.apply(&click("d"), &points).expect("toggle off");
    assert_eq!(ids(&state), vec!["b", "a"]);
    assert_eq!(state.mode(), InteractionMode::MultiClick);

    state.apply(&click("d"), &points).expect("toggle on");
    assert_eq!(ids(&state), vec!["b", "a", "d"]);
}

#[test]
fn removing_last_point_returns_to_brush_mode() {
    let points = grid();
    let mut state = SelectionState::default();
    state.apply(&click("a"), &points).expect("select");

    let transition = state
        .apply(&click("a"), &points)
        .expect("deselect")
        .expect("transition");

    assert!(state.is_empty());
    assert_eq!(transition.mode_before, InteractionMode::MultiClick);
    assert_eq!(transition.mode_after, InteractionMode::Brush);
}

#[test]
fn background_click_clears_only_in_multi_click() {
    let points = grid();
    let mut state = SelectionState::default();

    let ignored = state
        .apply(&SelectionEvent::BackgroundClick, &points)
        .expect("background click in brush mode");
    assert_eq!(ignored, None);

    state.apply(&click("a"), &points).expect("select");
    state.apply(&click("b"), &points).expect("select");
    let transition = state
        .apply(&SelectionEvent::BackgroundClick, &points)
        .expect("background click")
        .expect("transition");

    assert!(state.is_empty());
    assert_eq!(transition.mode_after, InteractionMode::Brush);
}

#[test]
fn background_click_in_brush_mode_keeps_brush_selection() {
    let points = grid();
    let mut state = SelectionState::default();
    let rect = BrushRect::new(0.0, 0.0, 20.0, 20.0).expect("valid rect");
    state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies");

    state
        .apply(&SelectionEvent::BackgroundClick, &points)
        .expect("background click");

    assert_eq!(ids(&state), vec!["a"]);
    assert_eq!(state.active_brush(), Some(rect));
}

#[test]
fn brush_after_multi_click_returns_to_brush_mode() {
    let points = grid();
    let mut state = SelectionState::default();
    state.apply(&click("d"), &points).expect("select");

    let rect = BrushRect::new(0.0, 0.0, 20.0, 60.0).expect("valid rect");
    let transition = state
        .apply(&SelectionEvent::BrushEnd(Some(rect)), &points)
        .expect("brush applies")
        .expect("transition");

    assert_eq!(ids(&state), vec!["a", "c"]);
    assert_eq!(transition.mode_before, InteractionMode::MultiClick);
    assert_eq!(state.mode(), InteractionMode::Brush);
}

#[test]
fn reset_is_idempotent() {
    let points = grid();
    let mut state = SelectionState::default();
    state.apply(&click("a"), &points).expect("select");

    state.apply(&SelectionEvent::Reset, &points).expect("reset");
    let first = state.clone();
    let transition = state
        .apply(&SelectionEvent::Reset, &points)
        .expect("second reset")
        .expect("reset always transitions");

    assert_eq!(state, first);
    assert_eq!(transition.selection_len, 0);
    assert!(!transition.mode_changed());
    assert_eq!(state, SelectionState::default());
}

#[test]
fn unknown_id_is_rejected_without_side_effects() {
    let points = grid();
    let mut state = SelectionState::default();
    state.apply(&click("a"), &points).expect("select");
    let before = state.clone();

    let result = state.apply(&click("zz"), &points);

    assert!(matches!(result, Err(ChartError::UnknownRecord(id)) if id == "zz"));
    assert_eq!(state, before);
}

#[test]
fn hit_test_prefers_first_point_in_dataset_order() {
    let points = vec![
        point(0, "first", 20.0, 20.0),
        point(1, "second", 21.0, 20.0),
    ];

    let hit = hit_test(&points, 21.0, 20.0, 4.0).expect("hit");
    assert_eq!(hit.id.as_str(), "first");
    assert!(hit_test(&points, 40.0, 40.0, 4.0).is_none());
    assert!(hit_test(&points, 24.0, 20.0, 4.0).is_some());
}

#[test]
fn brush_rect_rejects_non_finite_corners() {
    assert!(BrushRect::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
    assert!(BrushRect::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());

    let rect = BrushRect::new(5.0, 8.0, 1.0, 2.0).expect("valid rect");
    assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (1.0, 2.0, 5.0, 8.0));
    assert_eq!(rect.width(), 4.0);
    assert_eq!(rect.height(), 6.0);
}
