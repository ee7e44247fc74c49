//! Close-price time series chart rendered to an in-memory SVG.

use crate::error::VizError;
use crate::models::{Interval, Period, PriceBar};
use crate::provider::StockData;
use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use tracing::debug;

const CHART_WIDTH: u32 = 960;
const CHART_HEIGHT: u32 = 540;

// Dark template: near-black canvas, chartreuse price line
const CANVAS: RGBColor = RGBColor(17, 17, 17);
const PRICE_LINE: RGBColor = RGBColor(127, 255, 0);
const LINE_WIDTH: u32 = 4;

// Logo occupies this fraction of the chart width, anchored top-right
const LOGO_FRACTION: f64 = 0.12;

/// A rendered price chart.
///
/// Produced by [`stock_chart`]; holds the SVG text plus the parameters it
/// was rendered with.
#[derive(Debug, Clone)]
pub struct PriceChart {
    title: String,
    period: Period,
    interval: Interval,
    points: usize,
    svg: String,
}

impl PriceChart {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn points(&self) -> usize {
        self.points
    }

    pub fn as_svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Render a single-line chart of closing price over `period`.
///
/// `period` must be one of `1d`, `1mo`, `3mo`, `1y`, `2y`, `5y`, `10y`,
/// `ytd`, `max`; anything else fails with [`VizError::InvalidPeriod`]. The
/// `1d` period samples at five-minute granularity, every other period at
/// daily bars. When the provider reports a logo URL it is overlaid as an
/// `<image>` element in the top-right corner of the SVG.
pub fn stock_chart<P: StockData>(stock: &P, period: &str) -> Result<PriceChart, VizError> {
    let period: Period = period.parse()?;
    let interval = period.interval();

    let bars = stock.history(period, interval)?;
    if bars.is_empty() {
        return Err(VizError::NoData {
            symbol: stock.symbol().to_string(),
            period,
        });
    }
    debug!(
        symbol = stock.symbol(),
        period = period.as_str(),
        interval = interval.as_str(),
        points = bars.len(),
        "rendering price chart"
    );

    let title = format!("Stock: {}, Time Period: {}", stock.symbol(), period.as_str());
    let mut svg = draw_close_series(&title, interval, &bars)?;
    if let Some(url) = stock.logo_url() {
        overlay_logo(&mut svg, url);
    }

    Ok(PriceChart {
        title,
        period,
        interval,
        points: bars.len(),
        svg,
    })
}

fn draw_close_series(title: &str, interval: Interval, bars: &[PriceBar]) -> Result<String, VizError> {
    let (t0, t1) = time_range(bars);
    let (lo, hi) = price_range(bars);
    let label_format = match interval {
        Interval::FiveMinutes => "%H:%M",
        Interval::OneDay => "%Y-%m-%d",
    };

    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&CANVAS)
            .map_err(|e| VizError::Draw(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24).into_font().color(&WHITE))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(64)
            .build_cartesian_2d(t0..t1, lo..hi)
            .map_err(|e| VizError::Draw(e.to_string()))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .axis_style(ShapeStyle::from(&WHITE.mix(0.8)))
            .label_style(("sans-serif", 13).into_font().color(&WHITE))
            .x_label_formatter(&|t: &DateTime<Utc>| t.format(label_format).to_string())
            .y_desc("Closing Price")
            .draw()
            .map_err(|e| VizError::Draw(e.to_string()))?;

        chart
            .draw_series(LineSeries::new(
                bars.iter().map(|bar| (bar.time, bar.close)),
                ShapeStyle::from(&PRICE_LINE).stroke_width(LINE_WIDTH),
            ))
            .map_err(|e| VizError::Draw(e.to_string()))?;

        root.present().map_err(|e| VizError::Draw(e.to_string()))?;
    }

    Ok(buffer)
}

/// X axis bounds, widened when there is a single bar so the range stays
/// non-degenerate.
fn time_range(bars: &[PriceBar]) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = bars[0].time;
    let last = bars[bars.len() - 1].time;
    if first == last {
        (first - Duration::hours(1), last + Duration::hours(1))
    } else {
        (first, last)
    }
}

/// Y axis bounds padded by 2%, with a floor for flat series.
fn price_range(bars: &[PriceBar]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for bar in bars {
        lo = lo.min(bar.close);
        hi = hi.max(bar.close);
    }
    let pad = ((hi - lo) * 0.02).max(hi.abs() * 0.005).max(0.5);
    (lo - pad, hi + pad)
}

/// Insert an `<image>` element referencing `url` in the top-right corner.
///
/// The URL is embedded, never fetched; whatever displays the SVG resolves it.
fn overlay_logo(svg: &mut String, url: &str) {
    let Some(end) = svg.rfind("</svg>") else {
        return;
    };
    let logo_size = (CHART_WIDTH as f64 * LOGO_FRACTION) as u32;
    let x = CHART_WIDTH - logo_size - 8;
    let element = format!(
        "<image href=\"{}\" x=\"{}\" y=\"8\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\"/>\n",
        escape_xml(url),
        x,
        logo_size,
        logo_size
    );
    svg.insert_str(end, &element);
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
