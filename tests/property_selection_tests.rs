use proptest::prelude::*;
use statboard::api::{DashboardConfig, DashboardEngine, summary_text};
use statboard::core::{Dataset, Record, RecordId, Viewport};
use statboard::interaction::{
    BrushRect, InteractionMode, ScatterPoint, SelectionEvent, SelectionState,
};
use statboard::render::NullRenderer;

fn points(coords: &[(f64, f64)]) -> Vec<ScatterPoint> {
    coords
        .iter()
        .enumerate()
        .map(|(index, (cx, cy))| ScatterPoint {
            index,
            id: RecordId::new(format!("p{index}")),
            cx: *cx,
            cy: *cy,
            radius: 4.0,
        })
        .collect()
}

proptest! {
    #[test]
    fn selection_invariants_hold_for_any_event_sequence(
        coords in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 1..24),
        raw_events in prop::collection::vec((0usize..64, 0u8..5, any::<(u16, u16, u16, u16)>()), 0..40)
    ) {
        let points = points(&coords);
        let mut state = SelectionState::default();

        for (pick, kind, (x0, y0, x1, y1)) in raw_events {
            let event = match kind {
                0 => SelectionEvent::PointClick(RecordId::new(format!("p{}", pick % points.len()))),
                1 => SelectionEvent::BrushEnd(Some(
                    BrushRect::new(
                        f64::from(x0 % 500),
                        f64::from(y0 % 500),
                        f64::from(x1 % 500),
                        f64::from(y1 % 500),
                    )
                    .expect("finite"),
                )),
                2 => SelectionEvent::BrushEnd(None),
                3 => SelectionEvent::BackgroundClick,
                _ => SelectionEvent::Reset,
            };
            let before = state.clone();
            let transition = state.apply(&event, &points).expect("known ids only");

            // Every selected id is a projected point.
            prop_assert!(state
                .selection()
                .iter()
                .all(|id| points.iter().any(|point| &point.id == id)));
            // Multi-click mode never holds an empty selection.
            if state.mode() == InteractionMode::MultiClick {
                prop_assert!(!state.is_empty());
                prop_assert_eq!(state.active_brush(), None);
            }
            match (&event, transition) {
                (SelectionEvent::BackgroundClick, None) => {
                    prop_assert_eq!(&state, &before);
                }
                (_, None) => {
                    prop_assert!(false, "only background clicks may be ignored");
                }
                (_, Some(transition)) => {
                    prop_assert_eq!(transition.selection_len, state.selection().len());
                    prop_assert_eq!(transition.mode_after, state.mode());
                }
            }
            if let SelectionEvent::BrushEnd(Some(rect)) = &event {
                let expected: Vec<&RecordId> = points
                    .iter()
                    .filter(|point| rect.contains(point.cx, point.cy))
                    .map(|point| &point.id)
                    .collect();
                let actual: Vec<&RecordId> = state.selection().iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }

    #[test]
    fn double_toggle_restores_multi_click_selection(
        coords in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 2..16),
        seed in 0usize..16,
        extra in 0usize..16
    ) {
        let points = points(&coords);
        let first = RecordId::new(format!("p{}", seed % points.len()));
        let other = RecordId::new(format!("p{}", extra % points.len()));
        prop_assume!(first != other);

        let mut state = SelectionState::default();
        state.apply(&SelectionEvent::PointClick(first), &points).expect("first click");
        let before = state.clone();

        state.apply(&SelectionEvent::PointClick(other.clone()), &points).expect("toggle on");
        state.apply(&SelectionEvent::PointClick(other), &points).expect("toggle off");

        prop_assert_eq!(state, before);
    }

    #[test]
    fn engine_views_match_fresh_recompute(
        stats in prop::collection::vec(prop::array::uniform6(1.0f64..200.0), 1..20),
        clicks in prop::collection::vec(0usize..20, 0..10)
    ) {
        let records: Vec<Record> = stats
            .iter()
            .enumerate()
            .map(|(index, values)| {
                Record::new(format!("r{index}"), format!("Name {index}"), "Fire", (index % 3 + 1) as u32)
                    .with_stats(*values)
            })
            .collect();
        let dataset = Dataset::new(records).expect("dataset");
        let config = DashboardConfig::new(Viewport::new(1200, 800));
        let mut engine =
            DashboardEngine::new(NullRenderer::default(), dataset.clone(), config).expect("engine init");

        for click in clicks {
            let id = RecordId::new(format!("r{}", click % stats.len()));
            engine.point_click_id(&id).expect("known id");
        }

        let fresh = statboard::api::recompute_views(&dataset, engine.selection(), 10);
        prop_assert_eq!(engine.views(), &fresh);
        prop_assert!(engine.views().radar.domain.max >= 50.0);
        prop_assert!(engine.views().bar.y_max > 0.0);
    }

    #[test]
    fn summary_never_lists_more_than_limit(
        count in 0usize..40,
        limit in 1usize..15
    ) {
        let names: Vec<String> = (0..count).map(|index| format!("n{index}")).collect();
        let text = summary_text(names.iter().map(String::as_str), limit);

        if count == 0 {
            prop_assert_eq!(text, "None");
        } else {
            let listed = text.split(", ").filter(|part| part.starts_with('n')).count();
            prop_assert_eq!(listed, count.min(limit));
            prop_assert_eq!(text.ends_with(" more"), count > limit);
        }
    }
}
