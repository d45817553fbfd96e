use crate::render::{RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::layout::LegendLayout;
use super::palette::{TEXT, category_color};

const SWATCH: f64 = 15.0;

/// Category swatches in a bounded grid. Categories beyond the grid are
/// summarized by a trailing `(...and N more types)` note.
pub(crate) fn append_category_legend(
    frame: &mut RenderFrame,
    legend: LegendLayout,
    categories: &[String],
) {
    for (index, category) in categories.iter().enumerate() {
        let Some((x, y)) = legend.item_origin(index) else {
            break;
        };
        frame
            .rects
            .push(RectPrimitive::new(x, y, SWATCH, SWATCH, category_color(category)));
        if !category.is_empty() {
            frame.texts.push(TextPrimitive::new(
                category.clone(),
                x + SWATCH + 5.0,
                y + 1.0,
                12.0,
                TEXT,
                TextHAlign::Left,
            ));
        }
    }

    let capacity = legend.capacity();
    if capacity > 0 && categories.len() > capacity {
        frame.texts.push(TextPrimitive::new(
            format!("(...and {} more types)", categories.len() - capacity),
            legend.x,
            legend.y + legend.max_rows as f64 * 20.0 + 5.0,
            10.0,
            TEXT,
            TextHAlign::Left,
        ));
    }
}
