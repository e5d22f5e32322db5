//! Server-rendered HTML for the dashboard page.

use anyhow::Result;
use std::fmt::Write;

use super::figures::{
    Figure, airport_network, flight_frequency, format_price, price_distribution,
};
use super::{DashboardContext, PREVIEW_ROWS};
use crate::analyzers::types::DatasetSummary;

pub const PAGE_TITLE: &str = "Flight Route Analysis";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;margin:0 24px 48px;color:#222}
h1{text-align:center}
.stats{display:flex;flex-wrap:wrap;gap:24px;justify-content:center;margin-bottom:16px}
.stat .v{font-size:20px;font-weight:600}
.stat .l{font-size:11px;color:#666;text-transform:uppercase;letter-spacing:.06em}
.table-wrap{overflow-x:auto}
table{border-collapse:collapse;font-size:13px}
th,td{border:1px solid #ddd;padding:4px 8px;white-space:nowrap;text-align:left}
th{background:#f4f4f4}
.chart{width:100%;height:480px}
"#;

/// Renders the full page. Called once at startup.
pub fn render_page(ctx: &DashboardContext) -> Result<String> {
    let mut html = String::with_capacity(64 * 1024);

    write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<script src=\"{PLOTLY_JS}\"></script>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = PAGE_TITLE,
    )?;
    render_summary(&mut html, &ctx.summary)?;
    write!(
        html,
        "<p style=\"text-align:center;color:#888;font-size:12px\">Generated {}</p>\n",
        ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    html.push_str("<h3>Data Overview</h3>\n");
    render_preview(&mut html, ctx)?;

    let charts = [
        ("Flight Frequency", "flight-frequency", flight_frequency(&ctx.routes)),
        (
            "Flight Network Visualization",
            "network-graph",
            airport_network(&ctx.graph, &ctx.layout),
        ),
        (
            "Price Distribution",
            "price-distribution",
            price_distribution(&ctx.histogram),
        ),
    ];
    for (heading, id, figure) in &charts {
        render_chart(&mut html, heading, id, figure)?;
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn render_summary(html: &mut String, summary: &DatasetSummary) -> Result<()> {
    let stats = [
        ("Flights", summary.total_flights.to_string()),
        ("Priced", summary.priced_flights.to_string()),
        ("Routes", summary.routes.to_string()),
        ("Airports", summary.airports.to_string()),
        ("Min price", format_price(summary.min_price)),
        ("Avg price", format_price(summary.avg_price)),
        ("Max price", format_price(summary.max_price)),
    ];

    html.push_str("<div class=\"stats\">\n");
    for (label, value) in stats {
        writeln!(
            html,
            "<div class=\"stat\"><div class=\"v\">{}</div><div class=\"l\">{}</div></div>",
            value, label
        )?;
    }
    html.push_str("</div>\n");
    Ok(())
}

fn render_preview(html: &mut String, ctx: &DashboardContext) -> Result<()> {
    html.push_str("<div class=\"table-wrap\"><table>\n<thead><tr>");
    for column in ctx.table.columns() {
        write!(html, "<th>{}</th>", escape_html(column))?;
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in ctx.table.head(PREVIEW_ROWS) {
        html.push_str("<tr>");
        for cell in row {
            write!(html, "<td>{}</td>", escape_html(&cell.to_string()))?;
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table></div>\n");
    Ok(())
}

fn render_chart(html: &mut String, heading: &str, id: &str, figure: &Figure) -> Result<()> {
    let spec = script_safe(&figure.to_json()?);
    write!(
        html,
        "<h3>{heading}</h3>\n<div id=\"{id}\" class=\"chart\"></div>\n\
         <script>(function(){{var f={spec};Plotly.newPlot(\"{id}\",f.data,f.layout,{{responsive:true}});}})();</script>\n"
    )?;
    Ok(())
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON embedded in a `<script>` block must not close it early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
