use indexmap::IndexSet;
use tracing::{debug, info, trace};

use crate::core::{Dataset, RecordId};
use crate::error::ChartResult;
use crate::extensions::{ChartPlugin, PluginEvent};
use crate::interaction::{
    BrushRect, InteractionMode, SelectionEvent, SelectionState, SelectionTransition, hit_test,
};
use crate::render::{RenderFrame, Renderer};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::dashboard_frame_builder::DashboardScene;
use super::{
    BarAnimator, DashboardConfig, DashboardLayout, ScatterProjection, ViewModels, recompute_views,
};

/// Interactive dashboard facade consumed by host applications.
///
/// `DashboardEngine` owns the dataset, the selection state machine and the
/// derived views, and hands finished frames to its renderer. Every accepted
/// event recomputes the views before returning, so reads never observe a
/// stale view.
pub struct DashboardEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) dataset: Dataset,
    pub(super) config: DashboardConfig,
    pub(super) layout: DashboardLayout,
    pub(super) projection: ScatterProjection,
    pub(super) selection: SelectionState,
    pub(super) views: ViewModels,
    pub(super) bars: BarAnimator,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> DashboardEngine<R> {
    /// Creates an engine with an empty selection in brush mode.
    ///
    /// Views are derived here, so the first render already shows the
    /// overall averages on a matching radar domain.
    pub fn new(renderer: R, dataset: Dataset, config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        let layout = DashboardLayout::compute(config.viewport, config.top_margin);
        let base_radius = config.point_radius;
        let projection = ScatterProjection::project(
            &dataset,
            layout.scatter.width,
            layout.scatter.height,
            |_| base_radius,
        );
        let selection = SelectionState::default();
        let views = recompute_views(&dataset, selection.selection(), config.summary_name_limit);

        let mut engine = Self {
            renderer,
            dataset,
            config,
            layout,
            projection,
            selection,
            views,
            bars: BarAnimator::default(),
            plugins: Vec::new(),
        };
        engine.retarget_bars();

        info!(
            records = engine.dataset.len(),
            width = engine.config.viewport.width,
            height = engine.config.viewport.height,
            "dashboard engine initialized"
        );
        Ok(engine)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    #[must_use]
    pub fn projection(&self) -> &ScatterProjection {
        &self.projection
    }

    #[must_use]
    pub fn views(&self) -> &ViewModels {
        &self.views
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &IndexSet<RecordId> {
        self.selection.selection()
    }

    #[must_use]
    pub fn selection_state(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.selection.mode()
    }

    /// Bar heights currently on screen, in value units.
    #[must_use]
    pub fn bar_heights(&self) -> &[f64] {
        self.bars.displayed()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.bars.is_animating()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Applies one interaction event and recomputes every dependent view.
    ///
    /// Returns `Ok(None)` when the event does not apply in the current mode.
    /// A failed event leaves selection, mode and views untouched.
    pub fn handle_event(
        &mut self,
        event: SelectionEvent,
    ) -> ChartResult<Option<SelectionTransition>> {
        let Some(transition) = self.selection.apply(&event, &self.projection.points)? else {
            return Ok(None);
        };

        self.views = recompute_views(
            &self.dataset,
            self.selection.selection(),
            self.config.summary_name_limit,
        );
        self.retarget_bars();
        debug!(
            selection_len = transition.selection_len,
            radar_domain = self.views.radar.domain.max,
            bar_y_max = self.views.bar.y_max,
            "views recomputed"
        );

        self.emit_plugin_event(PluginEvent::SelectionChanged {
            selection_len: transition.selection_len,
            mode: transition.mode_after,
        });
        if transition.mode_changed() {
            self.emit_plugin_event(PluginEvent::ModeChanged {
                from: transition.mode_before,
                to: transition.mode_after,
            });
        }
        if transition.brush_cleared {
            self.emit_plugin_event(PluginEvent::BrushCleared);
        }
        Ok(Some(transition))
    }

    /// Routes a click in canvas pixels: the reset control resets and a hit on
    /// a scatter point clicks it. A click on empty scatter space lands on the
    /// brush overlay in brush mode (an empty brush, clearing the selection)
    /// and is a background click in multi-click mode. Clicks outside both
    /// regions are ignored.
    pub fn click_at(&mut self, x: f64, y: f64) -> ChartResult<Option<SelectionTransition>> {
        if self.layout.reset_button.contains(x, y) {
            return self.reset();
        }
        let scatter = self.layout.scatter;
        if !scatter.contains(x, y) {
            trace!(x, y, "click outside interactive regions");
            return Ok(None);
        }

        let (local_x, local_y) = scatter.to_local(x, y);
        let event = match hit_test(
            &self.projection.points,
            local_x,
            local_y,
            self.config.point_radius,
        ) {
            Some(point) => SelectionEvent::PointClick(point.id.clone()),
            None if self.selection.brush_enabled() => SelectionEvent::BrushEnd(None),
            None => SelectionEvent::BackgroundClick,
        };
        self.handle_event(event)
    }

    /// Finishes a brush gesture given in scatter-local pixels.
    pub fn brush_end(
        &mut self,
        rect: Option<BrushRect>,
    ) -> ChartResult<Option<SelectionTransition>> {
        self.handle_event(SelectionEvent::BrushEnd(rect))
    }

    /// Finishes a drag between two canvas points. The rectangle is clamped to
    /// the scatter area; a drag that collapses to a line or a point clears the
    /// brush.
    ///
    /// The brush is hidden in multi-click mode, so drags there are ignored.
    pub fn brush_between(
        &mut self,
        start: (f64, f64),
        end: (f64, f64),
    ) -> ChartResult<Option<SelectionTransition>> {
        if !self.selection.brush_enabled() {
            trace!("drag ignored while the brush is hidden");
            return Ok(None);
        }
        let scatter = self.layout.scatter;
        let clamp = |(x, y): (f64, f64)| {
            let (local_x, local_y) = scatter.to_local(x, y);
            (
                local_x.clamp(0.0, scatter.width),
                local_y.clamp(0.0, scatter.height),
            )
        };
        let (x0, y0) = clamp(start);
        let (x1, y1) = clamp(end);
        let rect = BrushRect::new(x0, y0, x1, y1)?;
        let rect = (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect);
        self.brush_end(rect)
    }

    pub fn point_click_id(&mut self, id: &RecordId) -> ChartResult<Option<SelectionTransition>> {
        self.handle_event(SelectionEvent::PointClick(id.clone()))
    }

    pub fn reset(&mut self) -> ChartResult<Option<SelectionTransition>> {
        self.handle_event(SelectionEvent::Reset)
    }

    /// Steps the bar transition. Returns `true` while bars are still moving.
    pub fn advance_animations(&mut self, elapsed_ms: f64) -> bool {
        self.bars.advance(elapsed_ms)
    }

    /// Materializes the current state into a backend-agnostic frame.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        self.scene().build()
    }

    pub(super) fn scene(&self) -> DashboardScene<'_> {
        DashboardScene {
            dataset: &self.dataset,
            config: &self.config,
            layout: &self.layout,
            projection: &self.projection,
            selection: &self.selection,
            views: &self.views,
            bar_heights: self.bars.displayed(),
        }
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        debug!(
            circles = frame.circles.len(),
            polygons = frame.polygons.len(),
            texts = frame.texts.len(),
            "dashboard frame rendered"
        );
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    /// Renders the frame into an external cairo context.
    ///
    /// Used by GTK draw callbacks while keeping the renderer decoupled from
    /// GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    fn retarget_bars(&mut self) {
        let targets: Vec<Option<f64>> =
            self.views.bar.entries.iter().map(|entry| entry.value).collect();
        self.bars.retarget(&targets, self.config.bar_transition_ms);
    }
}
