use std::cell::RefCell;
use std::rc::Rc;

use statboard::ChartError;
use statboard::api::{DashboardConfig, DashboardEngine};
use statboard::core::{Dataset, Record, RecordId, Viewport};
use statboard::extensions::{ChartPlugin, PluginContext, PluginEvent};
use statboard::interaction::{BrushRect, InteractionMode};
use statboard::render::NullRenderer;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(PluginEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::SelectionChanged { .. } => "selection",
        PluginEvent::ModeChanged { .. } => "mode",
        PluginEvent::BrushCleared => "brush_cleared",
        PluginEvent::Rendered => "rendered",
    }
}

fn engine() -> DashboardEngine<NullRenderer> {
    let dataset = Dataset::new(vec![
        Record::new("a", "Alpha", "Fire", 1).with_stats([50.0, 60.0, 40.0, 70.0, 45.0, 55.0]),
        Record::new("b", "Beta", "Water", 1).with_stats([65.0, 45.0, 80.0, 50.0, 60.0, 35.0]),
        Record::new("c", "Gamma", "Grass", 2).with_stats([40.0, 30.0, 30.0, 85.0, 70.0, 90.0]),
    ])
    .expect("dataset");
    let config = DashboardConfig::new(Viewport::new(1000, 700));
    DashboardEngine::new(NullRenderer::default(), dataset, config).expect("engine init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine
        .brush_end(Some(BrushRect::new(0.0, 0.0, 2000.0, 2000.0).expect("rect")))
        .expect("brush");
    engine.point_click_id(&RecordId::new("b")).expect("click");
    engine.point_click_id(&RecordId::new("b")).expect("toggle off");
    engine.render().expect("render");
    engine.reset().expect("reset");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "selection",
            "selection",
            "mode",
            "brush_cleared",
            "selection",
            "mode",
            "rendered",
            "selection",
        ]
    );
    assert_eq!(
        events[2].0,
        PluginEvent::ModeChanged {
            from: InteractionMode::Brush,
            to: InteractionMode::MultiClick,
        }
    );
}

#[test]
fn plugin_context_reflects_post_transition_state() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine
        .brush_end(Some(BrushRect::new(0.0, 0.0, 2000.0, 2000.0).expect("rect")))
        .expect("brush");

    let events = events.borrow();
    let (event, context) = events[0];
    assert_eq!(
        event,
        PluginEvent::SelectionChanged {
            selection_len: 3,
            mode: InteractionMode::Brush,
        }
    );
    assert_eq!(context.records_len, 3);
    assert_eq!(context.selection_len, 3);
    assert!(context.brush_active);
    assert_eq!(context.viewport, Viewport::new(1000, 700));
}

#[test]
fn ignored_and_failed_events_are_not_broadcast() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let outcome = engine.click_at(5.0, 890.0).expect("click outside every region");
    assert_eq!(outcome, None);
    assert!(engine.point_click_id(&RecordId::new("missing")).is_err());

    assert!(events.borrow().is_empty());
}

#[test]
fn duplicate_plugin_id_is_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));

    engine
        .register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())))
        .expect("first plugin");

    let result = engine.register_plugin(Box::new(RecordingPlugin::new("dup", events)));
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
    assert_eq!(engine.plugin_count(), 1);
}

#[test]
fn empty_plugin_id_is_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));

    let result = engine.register_plugin(Box::new(RecordingPlugin::new("", events)));
    assert!(result.is_err());
    assert_eq!(engine.plugin_count(), 0);
}

#[test]
fn unregister_plugin_stops_events() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    assert!(engine.has_plugin("recorder"));
    assert!(engine.unregister_plugin("recorder"));
    assert!(!engine.unregister_plugin("recorder"));

    engine.reset().expect("reset");
    assert!(events.borrow().is_empty());
}
