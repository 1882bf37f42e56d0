//! SVG visualization of a computed masonry layout.
//!
//! Draws the content box, column guides, and every item split into its
//! photo and annotation blocks. An optional viewport rect is overlaid and
//! the items it intersects are highlighted, which makes it easy to eyeball
//! what [`MasonryLayout::frames_intersecting`](crate::MasonryLayout::frames_intersecting)
//! returns for a scroll position.
//!
//! # Example
//!
//! ```
//! use zenmasonry::{MasonryLayout, Rect, svg::render_layout_svg};
//!
//! let mut layout = MasonryLayout::<f64>::new();
//! let result = layout
//!     .compute(8, 320.0, &mut |i: usize, w: f64| (w * (0.6 + 0.1 * (i % 4) as f64), 18.0))
//!     .unwrap();
//!
//! let svg = render_layout_svg(result, Some(Rect::new(0.0, 0.0, 320.0, 240.0)));
//! assert!(svg.starts_with("<svg"));
//! ```

use num_traits::Float;

use crate::geometry::Rect;
use crate::layout::LayoutResult;

/// Width the content box is scaled to.
const PANEL_W: f64 = 400.0;
/// Horizontal margin.
const MARGIN_X: f64 = 40.0;
/// Top margin, above the labels.
const MARGIN_TOP: f64 = 24.0;
/// Height of the label and annotation area above the panel.
const LABEL_H: f64 = 40.0;
/// Bottom margin.
const MARGIN_BOTTOM: f64 = 24.0;
/// Photo blocks shorter than this (in SVG units) get no index label.
const MIN_LABEL_H: f64 = 14.0;

/// Render a complete SVG document for `result`.
///
/// When `viewport` is given it is drawn as a dashed outline and every item
/// intersecting it is highlighted.
pub fn render_layout_svg<F: Float>(result: &LayoutResult<F>, viewport: Option<Rect<F>>) -> String {
    let content_w = to_f64(result.content_width);
    let content_h = to_f64(result.content_height);
    if result.is_empty() || content_w <= 0.0 {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    }

    let scale = PANEL_W / content_w;
    let panel_h = content_h * scale;
    let total_w = PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + panel_h + MARGIN_BOTTOM;
    let panel_x = MARGIN_X;
    let panel_y = MARGIN_TOP + LABEL_H;

    let mut svg = String::with_capacity(1024 + result.len() * 256);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w.ceil() as u32,
        total_h.ceil() as u32,
        total_w,
        total_h.ceil()
    ));
    svg.push('\n');

    // Style — light/dark mode via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .index { font-size: 10px; fill: #fff; }
  .content { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .guide { stroke: #bbb; stroke-width: 1; stroke-dasharray: 3,3; }
  .photo { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .caption { fill: #b8d4ee; stroke: #7baed0; stroke-width: 1; }
  .visible .photo { fill: #e0944a; stroke: #a85f1c; }
  .visible .caption { fill: #f2c79c; stroke: #c98a4c; }
  .viewport { fill: none; stroke: #c0392b; stroke-width: 2; stroke-dasharray: 6,3; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .content { fill: #2d2d2d; stroke: #555; }
    .guide { stroke: #555; }
    .photo { fill: #3a72a4; stroke: #5a9fd4; }
    .caption { fill: #2a4a65; stroke: #4a7a9e; }
    .visible .photo { fill: #b86a24; stroke: #e0944a; }
    .visible .caption { fill: #6e4a26; stroke: #b8814a; }
    .viewport { stroke: #ff6b5b; }
  }
</style>
"##);

    let columns = result.column_heights().len();
    let center_x = total_w / 2.0;
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        center_x,
        MARGIN_TOP + 14.0,
        escape_xml(&format!(
            "Masonry  {} columns · {} items",
            columns,
            result.len()
        ))
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="annotation" text-anchor="middle">content {}×{}</text>"#,
        center_x,
        MARGIN_TOP + 30.0,
        fmt_units(content_w),
        fmt_units(content_h)
    ));
    svg.push('\n');

    // Content box
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="content"/>"#,
        panel_x, panel_y, PANEL_W, panel_h
    ));
    svg.push('\n');

    // Column guides between columns
    let column_w = to_f64(result.column_width) * scale;
    for column in 1..columns {
        let x = panel_x + column as f64 * column_w;
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" class="guide"/>"#,
            x,
            panel_y,
            x,
            panel_y + panel_h
        ));
        svg.push('\n');
    }

    for item in &result.items {
        let visible = viewport.is_some_and(|v| item.frame.intersects(&v));
        svg.push_str(if visible { r#"<g class="visible">"# } else { "<g>" });

        let photo = scaled(item.photo_frame(), scale, panel_x, panel_y);
        svg.push_str(&rect_element(photo, "photo"));

        let caption = scaled(item.annotation_frame(), scale, panel_x, panel_y);
        if caption.3 > 0.0 {
            svg.push_str(&rect_element(caption, "caption"));
        }

        if photo.3 >= MIN_LABEL_H {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="index" text-anchor="middle">{}</text>"#,
                photo.0 + photo.2 / 2.0,
                photo.1 + photo.3 / 2.0 + 4.0,
                item.index
            ));
        }
        svg.push_str("</g>\n");
    }

    if let Some(v) = viewport {
        let (x, y, w, h) = scaled(v, scale, panel_x, panel_y);
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="viewport"/>"#,
            x, y, w, h
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Map a layout rect into SVG coordinates as `(x, y, w, h)`.
fn scaled<F: Float>(r: Rect<F>, scale: f64, origin_x: f64, origin_y: f64) -> (f64, f64, f64, f64) {
    (
        origin_x + to_f64(r.x) * scale,
        origin_y + to_f64(r.y) * scale,
        to_f64(r.width) * scale,
        to_f64(r.height) * scale,
    )
}

fn rect_element((x, y, w, h): (f64, f64, f64, f64), class: &str) -> String {
    format!(r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{class}"/>"#)
}

fn to_f64<F: Float>(v: F) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

/// Whole numbers without a decimal point, everything else with one digit.
fn fmt_units(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.1}")
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
