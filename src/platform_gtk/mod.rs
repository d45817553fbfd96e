use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::DashboardEngine;
use crate::error::ChartResult;
use crate::interaction::SelectionTransition;
use crate::render::CairoRenderer;

pub type UiEngine = Rc<RefCell<DashboardEngine<CairoRenderer>>>;

/// Used when the display settings are unavailable. Matches the GTK default.
const FALLBACK_DRAG_THRESHOLD_PX: f64 = 8.0;

/// Hosts a [`DashboardEngine`] inside a GTK `DrawingArea`.
///
/// Drags past the `gtk-dnd-drag-threshold` setting finish a brush. Shorter
/// presses are clicks routed through [`DashboardEngine::click_at`], and a
/// tick callback steps the bar transition while it runs. Hovering shows
/// [`DashboardEngine::tooltip_at`] as the widget tooltip.
pub struct GtkDashboard {
    engine: UiEngine,
    drawing_area: gtk::DrawingArea,
    /// Set once the current press has moved past the drag threshold.
    dragged: Rc<Cell<bool>>,
}

impl GtkDashboard {
    #[must_use]
    pub fn new(engine: DashboardEngine<CairoRenderer>) -> Self {
        let viewport = engine.config().viewport;
        let engine = Rc::new(RefCell::new(engine));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(viewport.width as i32);
        drawing_area.set_content_height(viewport.height as i32);
        drawing_area.set_draw_func({
            let engine = Rc::clone(&engine);
            move |_widget, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut chart) = engine.try_borrow_mut() else {
                    return;
                };
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "dashboard draw failed");
                }
            }
        });

        let dashboard = Self {
            engine,
            drawing_area,
            dragged: Rc::new(Cell::new(false)),
        };
        dashboard.attach_brush_gesture();
        dashboard.attach_click_gesture();
        dashboard.attach_tooltip();
        dashboard.attach_animation_tick();
        dashboard
    }

    #[must_use]
    pub fn engine(&self) -> UiEngine {
        Rc::clone(&self.engine)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Runs `update` against the engine and schedules a redraw.
    pub fn update_engine<T>(
        &self,
        update: impl FnOnce(&mut DashboardEngine<CairoRenderer>) -> ChartResult<T>,
    ) -> ChartResult<T> {
        let result = {
            let mut chart = self.engine.borrow_mut();
            update(&mut chart)
        };
        self.drawing_area.queue_draw();
        result
    }

    fn attach_brush_gesture(&self) {
        let drag = gtk::GestureDrag::new();
        let threshold = drag_threshold();

        drag.connect_drag_begin({
            let dragged = Rc::clone(&self.dragged);
            move |_, _, _| dragged.set(false)
        });
        drag.connect_drag_update({
            let dragged = Rc::clone(&self.dragged);
            move |_, offset_x, offset_y| {
                if is_drag(offset_x, offset_y, threshold) {
                    dragged.set(true);
                }
            }
        });

        let engine = Rc::clone(&self.engine);
        let drawing_area = self.drawing_area.clone();
        let dragged = Rc::clone(&self.dragged);
        drag.connect_drag_end(move |gesture, offset_x, offset_y| {
            if !dragged.get() {
                return;
            }
            let Some((start_x, start_y)) = gesture.start_point() else {
                return;
            };
            let Ok(mut chart) = engine.try_borrow_mut() else {
                return;
            };
            if !chart.layout().scatter.contains(start_x, start_y) {
                return;
            }
            let result = chart.brush_between(
                (start_x, start_y),
                (start_x + offset_x, start_y + offset_y),
            );
            log_failure(result, "brush");
            drawing_area.queue_draw();
        });
        self.drawing_area.add_controller(drag);
    }

    fn attach_click_gesture(&self) {
        let click = gtk::GestureClick::new();
        let engine = Rc::clone(&self.engine);
        let drawing_area = self.drawing_area.clone();
        let dragged = Rc::clone(&self.dragged);
        click.connect_released(move |_, n_press, x, y| {
            if n_press != 1 || dragged.get() {
                return;
            }
            let Ok(mut chart) = engine.try_borrow_mut() else {
                return;
            };
            log_failure(chart.click_at(x, y), "click");
            drawing_area.queue_draw();
        });
        self.drawing_area.add_controller(click);
    }

    fn attach_tooltip(&self) {
        self.drawing_area.set_has_tooltip(true);
        let engine = Rc::clone(&self.engine);
        self.drawing_area
            .connect_query_tooltip(move |_, x, y, _keyboard_mode, tooltip| {
                let Ok(chart) = engine.try_borrow() else {
                    return false;
                };
                match chart.tooltip_at(f64::from(x), f64::from(y)) {
                    Some(text) => {
                        tooltip.set_text(Some(&text));
                        true
                    }
                    None => false,
                }
            });
    }

    fn attach_animation_tick(&self) {
        let engine = Rc::clone(&self.engine);
        let last_frame_us = Rc::new(Cell::new(None::<i64>));
        self.drawing_area.add_tick_callback(move |widget, clock| {
            let now = clock.frame_time();
            let elapsed_ms = last_frame_us
                .replace(Some(now))
                .map_or(0.0, |previous| (now - previous) as f64 / 1000.0);
            if let Ok(mut chart) = engine.try_borrow_mut() {
                if chart.is_animating() {
                    chart.advance_animations(elapsed_ms);
                    widget.queue_draw();
                }
            }
            gtk::glib::ControlFlow::Continue
        });
    }
}

fn drag_threshold() -> f64 {
    gtk::Settings::default().map_or(FALLBACK_DRAG_THRESHOLD_PX, |settings| {
        f64::from(settings.property::<i32>("gtk-dnd-drag-threshold"))
    })
}

/// A press becomes a drag once either axis moves past `threshold`.
fn is_drag(offset_x: f64, offset_y: f64, threshold: f64) -> bool {
    offset_x.abs() > threshold || offset_y.abs() > threshold
}

fn log_failure(result: ChartResult<Option<SelectionTransition>>, gesture: &str) {
    if let Err(err) = result {
        warn!(error = %err, gesture, "interaction rejected");
    }
}
