//! SVG output for calendar grids.
//!
//! Each grid becomes a `RenderedBlock`: inner markup plus its pixel size.
//! Blocks only get an outer `<svg>` element once `stack` combines them.
//!
//! Output is deterministic: no timestamps, ids or random content, so the same
//! inputs always produce byte-identical markup.

use crate::calendar::{CalendarGrid, DAYS_PER_WEEK, MergedSeries};
use crate::domain::CellStyle;
use crate::render::palette::color_for;

const LEFT_MARGIN: usize = 50;
const TOP_MARGIN: usize = 18;
const RIGHT_PAD: usize = 10;
const BOTTOM_PAD: usize = 6;
const CORNER_RADIUS: usize = 2;
const LABEL_COLOR: &str = "#57606a";

/// Vertical space between stacked blocks.
pub const BLOCK_PADDING: usize = 6;
/// Width of a document with no blocks at all.
pub const EMPTY_WIDTH: usize = 100;

/// Rendered markup for one grid, without the outer `<svg>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub body: String,
    pub width: usize,
    pub height: usize,
}

/// Lay out one grid and color each day by its merged count.
pub fn render_grid(grid: &CalendarGrid, series: &MergedSeries, style: CellStyle) -> RenderedBlock {
    let pitch = style.pitch() as usize;
    let size = style.size;
    let width = LEFT_MARGIN + grid.columns() * pitch + RIGHT_PAD;
    let height = TOP_MARGIN + DAYS_PER_WEEK * pitch + BOTTOM_PAD;

    let mut lines = Vec::with_capacity(grid.days().len() + 3);
    lines.push(format!(
        "<text x='5' y='{TOP_MARGIN}' font-size='12' font-family='sans-serif' fill='{LABEL_COLOR}'>{}</text>",
        escape_text(&grid.label)
    ));
    lines.push(format!("<g transform='translate({LEFT_MARGIN},{TOP_MARGIN})'>"));

    for (pos, date) in grid.cells() {
        let count = series.get(date);
        lines.push(format!(
            "<rect x='{x}' y='{y}' width='{size}' height='{size}' rx='{CORNER_RADIUS}' ry='{CORNER_RADIUS}' fill='{fill}'>\
             <title>{date}: {count} contributions</title></rect>",
            x = pos.column * pitch,
            y = pos.row * pitch,
            fill = color_for(count),
        ));
    }
    lines.push("</g>".to_string());

    RenderedBlock {
        body: lines.join("\n"),
        width,
        height,
    }
}

/// Stack blocks top to bottom into a single SVG document.
///
/// Blocks keep their own coordinates; each is only shifted down by the
/// heights of the blocks above it plus `BLOCK_PADDING` per gap.
pub fn stack(blocks: &[RenderedBlock]) -> String {
    let width = blocks.iter().map(|b| b.width).max().unwrap_or(EMPTY_WIDTH);
    let gaps = blocks.len().saturating_sub(1);
    let height = blocks.iter().map(|b| b.height).sum::<usize>() + BLOCK_PADDING * gaps;

    let mut lines = Vec::with_capacity(blocks.len() + 2);
    lines.push(svg_open(width, height));

    let mut offset = 0;
    for block in blocks {
        lines.push(format!("<g transform='translate(0,{offset})'>\n{}\n</g>", block.body));
        offset += block.height + BLOCK_PADDING;
    }
    lines.push("</svg>\n".to_string());

    lines.join("\n")
}

fn svg_open(width: usize, height: usize) -> String {
    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>"
    )
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
