//! HTML rendering of a computed [`DashboardData`].
//!
//! Thin presentation glue: everything here consumes the plain data the
//! pipeline produced and knows nothing about how it was computed.

use crate::analytics::types::{AggregateRow, DashboardData, MonthlyPoint};

/// Renders the full dashboard page.
pub fn page(data: &DashboardData) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Trip Analytics Dashboard</title>\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }\n\
         .kpi { display: flex; justify-content: space-around; margin: 20px 0; }\n\
         .kpi-card { background: white; padding: 20px; border-radius: 10px; text-align: center; flex: 1; margin: 10px; }\n\
         .kpi-value { font-size: 32px; font-weight: bold; color: #3498db; }\n\
         .panel { background: white; padding: 20px; border-radius: 10px; margin: 20px 0; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { text-align: left; padding: 6px 12px; border-bottom: 1px solid #eee; }\n\
         form select, form input { margin-right: 12px; }\n\
         </style>\n</head>\n<body>\n<h1>Trip Analytics Dashboard</h1>\n",
    );

    push_filter_form(&mut html, data);
    push_kpis(&mut html, data);

    push_breakdown(
        &mut html,
        "Top 10 Destinations",
        "Total profit",
        &data.top_destinations,
        |g| g.total,
    );
    push_breakdown(
        &mut html,
        "Top 10 Drivers",
        "Avg profit per trip",
        &data.top_drivers,
        |g| g.mean,
    );
    push_monthly(&mut html, &data.monthly);
    push_highlights(&mut html, data);

    html.push_str("</body>\n</html>\n");
    html
}

fn push_filter_form(html: &mut String, data: &DashboardData) {
    html.push_str("<div class=\"panel\">\n<form method=\"get\" action=\"/\">\n");
    html.push_str("<label>From <input type=\"date\" name=\"date_from\"></label>\n");
    html.push_str("<label>To <input type=\"date\" name=\"date_to\"></label>\n");

    push_select(html, "driver", "Driver", &data.filter_options.drivers);
    push_select(html, "from_city", "Origin", &data.filter_options.from_cities);
    push_select(html, "to_city", "Destination", &data.filter_options.to_cities);

    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n</div>\n");
}

fn push_select(html: &mut String, name: &str, label: &str, values: &[String]) {
    html.push_str(&format!(
        "<label>{label} <select name=\"{name}\">\n<option value=\"all\">all</option>\n"
    ));
    for value in values {
        let escaped = escape(value);
        html.push_str(&format!("<option value=\"{escaped}\">{escaped}</option>\n"));
    }
    html.push_str("</select></label>\n");
}

fn push_kpis(html: &mut String, data: &DashboardData) {
    html.push_str("<div class=\"kpi\">\n");
    push_kpi_card(html, &format_count(data.kpis.total_trips), "Trips");
    push_kpi_card(html, &format_money(data.kpis.total_revenue), "Revenue");
    push_kpi_card(html, &format_money(data.kpis.total_profit), "Profit");
    push_kpi_card(html, &format!("{:.1}%", data.kpis.profit_margin), "Margin");
    html.push_str("</div>\n");
}

fn push_kpi_card(html: &mut String, value: &str, label: &str) {
    html.push_str(&format!(
        "<div class=\"kpi-card\"><div class=\"kpi-value\">{value}</div><div>{label}</div></div>\n"
    ));
}

fn push_breakdown<F>(html: &mut String, title: &str, metric_label: &str, groups: &[AggregateRow], metric: F)
where
    F: Fn(&AggregateRow) -> f64,
{
    html.push_str(&format!("<div class=\"panel\">\n<h2>{title}</h2>\n"));
    if groups.is_empty() {
        html.push_str("<p>No data for the selected filters.</p>\n</div>\n");
        return;
    }

    html.push_str(&format!(
        "<table>\n<tr><th>#</th><th>Name</th><th>{metric_label}</th><th>Trips</th></tr>\n"
    ));
    for (i, group) in groups.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            escape(&group.key),
            format_money(metric(group)),
            group.count,
        ));
    }
    html.push_str("</table>\n</div>\n");
}

fn push_monthly(html: &mut String, monthly: &[MonthlyPoint]) {
    html.push_str("<div class=\"panel\">\n<h2>Monthly Revenue vs Profit</h2>\n");
    if monthly.is_empty() {
        html.push_str("<p>No dated trips in the selected range.</p>\n</div>\n");
        return;
    }

    html.push_str("<table>\n<tr><th>Month</th><th>Revenue</th><th>Profit</th></tr>\n");
    for point in monthly {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            point.month,
            format_money(point.revenue),
            format_money(point.profit),
        ));
    }
    html.push_str("</table>\n</div>\n");
}

fn push_highlights(html: &mut String, data: &DashboardData) {
    html.push_str("<div class=\"panel\">\n<h2>Highlights</h2>\n");
    match &data.highlights {
        Some(h) => {
            html.push_str(&format!(
                "<p>Most profitable origin: <b>{}</b> ({} total profit).</p>\n",
                escape(&h.best_destination.key),
                format_money(h.best_destination.total),
            ));
            html.push_str(&format!(
                "<p>Best driver: <b>{}</b> ({} average profit over {} trips).</p>\n",
                escape(&h.best_driver.key),
                format_money(h.best_driver.mean),
                h.best_driver.count,
            ));
        }
        None => html.push_str("<p>Insufficient data for the selected filters.</p>\n"),
    }
    html.push_str("</div>\n");
}

/// Formats a money value with thousands separators and no decimals.
fn format_money(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let formatted = format_count(rounded.abs() as u64 as usize);
    if negative {
        format!("-{formatted}")
    } else {
        formatted
    }
}

fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
