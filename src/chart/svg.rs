//! SVG encoding of a [`ChartModel`].

use quick_xml::escape::escape;

use crate::chart::model::{BarStyle, ChartModel};
use crate::metrics::zones::Color;
use crate::storage::config::ChartSettings;

const MARGIN_LEFT: f64 = 110.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 80.0;
const MARGIN_BOTTOM: f64 = 90.0;

const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";
const FONT_SIZE_AXIS: f64 = 24.0;
const FONT_SIZE_TICK: f64 = 18.0;
const FONT_SIZE_TITLE: f64 = 28.0;
const FONT_SIZE_LEGEND: f64 = 18.0;
const FONT_SIZE_FREE_RIDE: f64 = 16.0;

const ZONE_OPACITY: f64 = 0.8;
const FREE_RIDE_OPACITY: f64 = 0.6;
const GRID_OPACITY: f64 = 0.3;

const LEGEND_ROW: f64 = 28.0;
const LEGEND_SWATCH: f64 = 18.0;
const LEGEND_WIDTH: f64 = 270.0;

/// Maps workout time and power onto the plot rectangle.
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    total_seconds: f64,
    max_power: f64,
}

impl Plot {
    fn x(&self, seconds: f64) -> f64 {
        self.left + seconds / self.total_seconds * self.width
    }

    fn y(&self, power: f64) -> f64 {
        self.bottom() - power / self.max_power * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Render the chart as a standalone SVG document.
pub fn render_svg(chart: &ChartModel, settings: &ChartSettings) -> String {
    let width = settings.width as f64;
    let height = settings.height as f64;
    let plot = Plot {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        height: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        // An empty workout still gets a drawable axis.
        total_seconds: (chart.total_seconds as f64).max(1.0),
        max_power: if chart.max_power > 0.0 { chart.max_power } else { 1.0 },
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}">"#,
        w = settings.width,
        h = settings.height,
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="white"/>"#,
        w = settings.width,
        h = settings.height,
    ));
    svg.push('\n');

    write_defs(&mut svg, &plot);
    write_grid(&mut svg, chart, &plot);
    write_bars(&mut svg, chart, &plot);
    write_axes(&mut svg, chart, &plot);
    write_labels(&mut svg, chart, &plot, width);
    write_legend(&mut svg, chart, &plot);

    svg.push_str("</svg>\n");
    svg
}

fn write_defs(svg: &mut String, plot: &Plot) {
    svg.push_str("<defs>\n");
    svg.push_str(concat!(
        r#"<pattern id="free-ride-hatch" patternUnits="userSpaceOnUse" width="12" height="12">"#,
        r#"<path d="M-3,3 L3,-3 M0,12 L12,0 M9,15 L15,9" stroke="black" stroke-width="1"/>"#,
        "</pattern>\n",
    ));
    svg.push_str(&format!(
        r#"<clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
        plot.left, plot.top, plot.width, plot.height
    ));
    svg.push_str("\n</defs>\n");
}

fn write_grid(svg: &mut String, chart: &ChartModel, plot: &Plot) {
    svg.push_str(&format!(r#"<g stroke="gray" stroke-opacity="{GRID_OPACITY}" stroke-width="1">"#));
    svg.push('\n');
    for tick in &chart.x_ticks {
        let x = plot.x(tick.value);
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}"/>"#,
            plot.top,
            plot.bottom()
        ));
        svg.push('\n');
    }
    for tick in &chart.y_ticks {
        let y = plot.y(tick.value);
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}"/>"#,
            plot.left,
            plot.right()
        ));
        svg.push('\n');
    }
    svg.push_str("</g>\n");
}

fn write_bars(svg: &mut String, chart: &ChartModel, plot: &Plot) {
    svg.push_str(r#"<g clip-path="url(#plot-area)">"#);
    svg.push('\n');

    for bar in &chart.bars {
        let x = plot.x(bar.start_seconds);
        let w = plot.x(bar.start_seconds + bar.duration_seconds) - x;
        let y = plot.y(bar.power.max(0.0));
        let h = plot.bottom() - y;

        match bar.style {
            BarStyle::Zone => {
                svg.push_str(&format!(
                    r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{}" fill-opacity="{ZONE_OPACITY}" stroke="white" stroke-width="1"/>"#,
                    bar.color.to_hex()
                ));
                svg.push('\n');
            }
            BarStyle::FreeRide => {
                svg.push_str(&format!(
                    r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="{}" fill-opacity="{FREE_RIDE_OPACITY}" stroke="black" stroke-width="2"/>"#,
                    bar.color.to_hex()
                ));
                svg.push('\n');
                svg.push_str(&format!(
                    r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="url(#free-ride-hatch)" fill-opacity="{FREE_RIDE_OPACITY}"/>"#
                ));
                svg.push('\n');
                text(
                    svg,
                    x + w / 2.0,
                    plot.y(bar.power / 2.0),
                    FONT_SIZE_FREE_RIDE,
                    "middle",
                    r#" font-weight="bold" dominant-baseline="central""#,
                    "FREE RIDE",
                );
            }
        }
    }

    svg.push_str("</g>\n");
}

fn write_axes(svg: &mut String, chart: &ChartModel, plot: &Plot) {
    // Left and bottom spines only.
    svg.push_str(&format!(
        r#"<path d="M{l:.2},{t:.2} L{l:.2},{b:.2} L{r:.2},{b:.2}" fill="none" stroke="black" stroke-width="1.5"/>"#,
        l = plot.left,
        t = plot.top,
        b = plot.bottom(),
        r = plot.right()
    ));
    svg.push('\n');

    for tick in &chart.x_ticks {
        text(
            svg,
            plot.x(tick.value),
            plot.bottom() + FONT_SIZE_TICK + 8.0,
            FONT_SIZE_TICK,
            "middle",
            "",
            &tick.label,
        );
    }
    for tick in &chart.y_ticks {
        text(
            svg,
            plot.left - 10.0,
            plot.y(tick.value),
            FONT_SIZE_TICK,
            "end",
            r#" dominant-baseline="central""#,
            &tick.label,
        );
    }
}

fn write_labels(svg: &mut String, chart: &ChartModel, plot: &Plot, width: f64) {
    text(
        svg,
        width / 2.0,
        MARGIN_TOP / 2.0,
        FONT_SIZE_TITLE,
        "middle",
        r#" font-weight="bold""#,
        &chart.title,
    );
    text(
        svg,
        plot.left + plot.width / 2.0,
        plot.bottom() + FONT_SIZE_TICK + FONT_SIZE_AXIS + 28.0,
        FONT_SIZE_AXIS,
        "middle",
        "",
        &chart.x_label,
    );

    let cx = 30.0;
    let cy = plot.top + plot.height / 2.0;
    svg.push_str(&format!(
        r#"<text x="{cx:.2}" y="{cy:.2}" font-size="{FONT_SIZE_AXIS}" text-anchor="middle" transform="rotate(-90 {cx:.2} {cy:.2})">{}</text>"#,
        escape(chart.y_label.as_str())
    ));
    svg.push('\n');
}

fn write_legend(svg: &mut String, chart: &ChartModel, plot: &Plot) {
    if chart.legend.is_empty() {
        return;
    }

    let box_height = LEGEND_ROW * chart.legend.len() as f64 + 16.0;
    let left = plot.right() - LEGEND_WIDTH - 10.0;
    let top = plot.top + 10.0;

    svg.push_str(&format!(
        r#"<rect x="{left:.2}" y="{top:.2}" width="{LEGEND_WIDTH:.2}" height="{box_height:.2}" fill="white" fill-opacity="0.8" stroke="lightgray" rx="4"/>"#
    ));
    svg.push('\n');

    for (i, entry) in chart.legend.iter().enumerate() {
        let row_y = top + 8.0 + LEGEND_ROW * i as f64;
        swatch(svg, left + 10.0, row_y + (LEGEND_ROW - LEGEND_SWATCH) / 2.0, entry.color);
        text(
            svg,
            left + 20.0 + LEGEND_SWATCH,
            row_y + LEGEND_ROW / 2.0,
            FONT_SIZE_LEGEND,
            "start",
            r#" dominant-baseline="central""#,
            &entry.label,
        );
    }
}

fn swatch(svg: &mut String, x: f64, y: f64, color: Color) {
    svg.push_str(&format!(
        r#"<rect x="{x:.2}" y="{y:.2}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{}"/>"#,
        color.to_hex()
    ));
    svg.push('\n');
}

fn text(svg: &mut String, x: f64, y: f64, size: f64, anchor: &str, extra: &str, content: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" font-size="{size}" text-anchor="{anchor}"{extra}>{}</text>"#,
        escape(content)
    ));
    svg.push('\n');
}
