use crate::core::{LinearScale, PlotRect};
use crate::render::{LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::palette::{INK, TEXT};

const TICK_LENGTH: f64 = 6.0;
const TICK_FONT_PX: f64 = 10.0;
const TITLE_FONT_PX: f64 = 14.0;

/// Formats a tick value with no more precision than its step needs.
#[must_use]
pub(crate) fn tick_label(value: f64, step: f64) -> String {
    if step >= 1.0 || step <= 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [first, second, ..] => second - first,
        _ => 1.0,
    }
}

/// Domain line along the bottom edge of `plot` plus labelled ticks.
/// `scale` maps values into plot-local x.
pub(crate) fn append_bottom_axis(
    frame: &mut RenderFrame,
    plot: PlotRect,
    scale: LinearScale,
    tick_count: usize,
) {
    let y = plot.bottom();
    frame
        .lines
        .push(LinePrimitive::new(plot.x, y, plot.right(), y, 1.0, INK));
    let ticks = scale.ticks(tick_count);
    let step = tick_step(&ticks);
    for value in ticks {
        let x = plot.x + scale.apply(value);
        frame
            .lines
            .push(LinePrimitive::new(x, y, x, y + TICK_LENGTH, 1.0, INK));
        frame.texts.push(TextPrimitive::new(
            tick_label(value, step),
            x,
            y + TICK_LENGTH + 2.0,
            TICK_FONT_PX,
            TEXT,
            TextHAlign::Center,
        ));
    }
}

/// Domain line along the left edge of `plot` plus labelled ticks.
/// `scale` maps values into plot-local y.
pub(crate) fn append_left_axis(
    frame: &mut RenderFrame,
    plot: PlotRect,
    scale: LinearScale,
    tick_count: usize,
) {
    let x = plot.x;
    frame
        .lines
        .push(LinePrimitive::new(x, plot.y, x, plot.bottom(), 1.0, INK));
    let ticks = scale.ticks(tick_count);
    let step = tick_step(&ticks);
    for value in ticks {
        let y = plot.y + scale.apply(value);
        frame
            .lines
            .push(LinePrimitive::new(x - TICK_LENGTH, y, x, y, 1.0, INK));
        frame.texts.push(TextPrimitive::new(
            tick_label(value, step),
            x - TICK_LENGTH - 3.0,
            y - TICK_FONT_PX / 2.0,
            TICK_FONT_PX,
            TEXT,
            TextHAlign::Right,
        ));
    }
}

/// Centered title under the bottom axis.
pub(crate) fn append_bottom_title(frame: &mut RenderFrame, plot: PlotRect, offset: f64, text: &str) {
    frame.texts.push(TextPrimitive::new(
        text,
        plot.x + plot.width / 2.0,
        plot.bottom() + offset - TITLE_FONT_PX,
        TITLE_FONT_PX,
        TEXT,
        TextHAlign::Center,
    ));
}

/// Vertical title left of the plot, read bottom-to-top.
pub(crate) fn append_left_title(frame: &mut RenderFrame, plot: PlotRect, offset: f64, text: &str) {
    frame.texts.push(
        TextPrimitive::new(
            text,
            plot.x - offset,
            plot.y + plot.height / 2.0,
            TITLE_FONT_PX,
            TEXT,
            TextHAlign::Center,
        )
        .rotated(-90.0),
    );
}

/// Bold plot title centered over `plot`, `offset` pixels above its top edge.
pub(crate) fn append_plot_title(frame: &mut RenderFrame, plot: PlotRect, offset: f64, text: &str) {
    frame.texts.push(
        TextPrimitive::new(
            text,
            plot.x + plot.width / 2.0,
            plot.y - offset,
            16.0,
            TEXT,
            TextHAlign::Center,
        )
        .bold(),
    );
}
