use crate::period::{month_choices, year_choices, Granularity};
use crate::view::{format_amount, format_percent, DashboardView, Projection, NOT_APPLICABLE};
use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub fn render_index(view: &DashboardView, currency: &str, today: NaiveDate) -> String {
    fill(
        INDEX_HTML,
        &[
            ("SUBTITLE", encode_text(&view.derived.subtitle).into_owned()),
            ("SELECTOR", render_selector(&view.token, today)),
            ("STATUS", render_status(view)),
            ("KPIS", render_kpis(view, currency)),
            ("CHART", render_chart(view, currency)),
            ("DAY", render_day(view, currency)),
        ],
    )
}

/// Substitutes `{{NAME}}` slots in one pass over `template`. Inserted values
/// are never scanned for slots themselves.
fn fill(template: &str, slots: &[(&str, String)]) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let slot = after.find("}}").and_then(|end| {
            let name = &after[..end];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (value, &after[end + 2..]))
        });
        match slot {
            Some((value, tail)) => {
                html.push_str(value);
                rest = tail;
            }
            None => {
                html.push_str("{{");
                rest = after;
            }
        }
    }
    html.push_str(rest);
    html
}

fn render_selector(active: &str, today: NaiveDate) -> String {
    let mut html = String::new();
    for (token, label) in [("THIS_MONTH", "This Month"), ("YTD", "Year to Date")] {
        let class = if token == active { "tab active" } else { "tab" };
        let _ = write!(
            html,
            r#"<form method="post" action="/period"><input type="hidden" name="period" value="{token}" /><button class="{class}" type="submit">{label}</button></form>"#
        );
    }

    html.push_str(r#"<form method="post" action="/period" class="picker"><select name="period">"#);
    for year in year_choices(today) {
        let _ = write!(html, r#"<optgroup label="{year}">"#);
        for choice in month_choices() {
            let token = format!("MONTH:{year}:{}", choice.month);
            let selected = if token == active { " selected" } else { "" };
            let _ = write!(html, r#"<option value="{token}"{selected}>{} {year}</option>"#, choice.name);
        }
        html.push_str("</optgroup>");
    }
    html.push_str(r#"</select><button class="tab" type="submit">Show month</button></form>"#);

    html.push_str(r#"<form method="post" action="/period" class="picker"><select name="period">"#);
    for year in year_choices(today) {
        let token = format!("YEAR:{year}");
        let selected = if token == active { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{token}"{selected}>{year}</option>"#);
    }
    html.push_str(r#"</select><button class="tab" type="submit">Show year</button></form>"#);
    html
}

fn render_status(view: &DashboardView) -> String {
    if view.loading {
        return r#"<div class="status" data-type="info">Loading...</div>"#.to_string();
    }
    match &view.error {
        Some(message) => format!(
            r#"<div class="status" data-type="error">Error: {}<form method="post" action="/retry"><button class="tab" type="submit">Retry</button></form></div>"#,
            encode_text(message)
        ),
        None => String::new(),
    }
}

fn render_kpis(view: &DashboardView, currency: &str) -> String {
    let Some(snapshot) = &view.snapshot else {
        return String::new();
    };
    let derived = &view.derived;
    let mut html = String::new();

    let change = snapshot
        .change_percent
        .map(|percent| format!("{} vs previous period", format_percent(percent)));
    html.push_str(&kpi_card(
        "Total Spent",
        &format_amount(snapshot.total_spent, currency),
        change.as_deref(),
    ));

    let days = derived
        .active_days
        .map(|days| format!("{days} days with spending"));
    html.push_str(&kpi_card(
        "Average per Day",
        &format_amount(snapshot.avg_per_day, currency),
        days.as_deref(),
    ));

    match derived.projection {
        Projection::Shown {
            value,
            compared_percent,
        } => {
            let compared = compared_percent
                .map(|percent| format!("{} vs average month", format_percent(percent)));
            html.push_str(&kpi_card(
                "Projected Month-End",
                &format_amount(value, currency),
                compared.as_deref(),
            ));
        }
        Projection::NotApplicable => {
            html.push_str(&kpi_card("Projected Month-End", NOT_APPLICABLE, None));
        }
    }

    if let Some(average) = derived.monthly_average {
        html.push_str(&kpi_card(
            "Average Monthly Spend",
            &format_amount(average, currency),
            None,
        ));
    }
    html
}

fn kpi_card(title: &str, value: &str, note: Option<&str>) -> String {
    let note = note
        .map(|note| format!(r#"<span class="note">{}</span>"#, encode_text(note)))
        .unwrap_or_default();
    format!(
        r#"<div class="stat"><span class="label">{}</span><span class="value">{}</span>{note}</div>"#,
        encode_text(title),
        encode_text(value)
    )
}

fn render_chart(view: &DashboardView, currency: &str) -> String {
    if view.snapshot.is_none() {
        return String::new();
    }
    let title = match view.derived.granularity {
        Granularity::Daily => "Daily Spending",
        Granularity::Monthly => "Monthly Spending",
    };
    if view.bars.is_empty() {
        return format!(r#"<h2>{title}</h2><p class="hint">No data available for this period</p>"#);
    }

    let max = view
        .bars
        .iter()
        .map(|bar| bar.amount)
        .chain(view.derived.reference.as_ref().map(|line| line.value))
        .fold(0.0_f64, f64::max);
    let height = |amount: f64| if max > 0.0 { (amount / max * 100.0).clamp(0.0, 100.0) } else { 0.0 };

    let mut html = format!(r#"<h2>{title}</h2>"#);
    if let Some(line) = &view.derived.reference {
        let _ = write!(
            html,
            r#"<p class="hint">{}: {}</p>"#,
            line.label,
            encode_text(&format_amount(line.value, currency))
        );
    }
    html.push_str(r#"<div class="chart">"#);
    if let Some(line) = &view.derived.reference {
        let _ = write!(html, r#"<div class="reference" style="bottom:{:.1}%"></div>"#, height(line.value));
    }
    for bar in &view.bars {
        let mut class = String::from("bar");
        if bar.above_reference {
            class.push_str(" above");
        }
        if bar.is_today {
            class.push_str(" today");
        }
        if bar.is_selected {
            class.push_str(" selected");
        }
        let tip = format!("{} {}", bar.label, format_amount(bar.amount, currency));
        let tip = encode_double_quoted_attribute(&tip);
        let style = format!("height:{:.1}%", height(bar.amount));
        match view.derived.granularity {
            Granularity::Daily => {
                let _ = write!(
                    html,
                    r#"<form method="post" action="/day" class="column"><input type="hidden" name="date" value="{label}" /><button class="{class}" style="{style}" title="{tip}" type="submit"></button><span class="tick">{short}</span></form>"#,
                    label = encode_double_quoted_attribute(&bar.label),
                    short = encode_text(bar.label.get(5..).unwrap_or(&bar.label)),
                );
            }
            Granularity::Monthly => {
                let _ = write!(
                    html,
                    r#"<div class="column"><div class="{class}" style="{style}" title="{tip}"></div><span class="tick">{label}</span></div>"#,
                    label = encode_text(&bar.label),
                );
            }
        }
    }
    html.push_str("</div>");
    html
}

fn render_day(view: &DashboardView, currency: &str) -> String {
    let Some(date) = view.day.date else {
        return String::new();
    };
    let mut html = format!(
        r#"<div class="chart-header"><h2>Transactions on {date}</h2><form method="post" action="/day/close"><button class="tab" type="submit">Close</button></form></div>"#
    );
    if view.day.loading {
        html.push_str(r#"<p class="hint">Loading...</p>"#);
        return html;
    }
    if let Some(message) = &view.day.error {
        let _ = write!(html, r#"<div class="status" data-type="error">Error: {}</div>"#, encode_text(message));
        return html;
    }
    if view.day.transactions.is_empty() {
        html.push_str(r#"<p class="hint">No transactions on this day.</p>"#);
        return html;
    }

    html.push_str("<table><thead><tr><th>Merchant</th><th>Description</th><th>Amount</th></tr></thead><tbody>");
    for transaction in &view.day.transactions {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            encode_text(&transaction.merchant),
            encode_text(&transaction.raw_description),
            encode_text(&format_amount(transaction.amount, currency))
        );
    }
    html.push_str("</tbody></table>");
    if view.day.truncated {
        html.push_str(r#"<p class="hint">Only the first page of this day's transactions is shown.</p>"#);
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Spending Dashboard</title>
  <style>
    :root {
      --bg: #111214;
      --card: #1c1d21;
      --ink: #e8e6e3;
      --muted: #a3a3a3;
      --calm: #3b82f6;
      --warn: #f59e0b;
      --today: #ef4444;
      --picked: #10b981;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
    }

    .subtitle,
    .hint,
    .note,
    .label,
    .tick {
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 24px;
    }

    .selector {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .tab {
      border: 1px solid #333;
      border-radius: 10px;
      padding: 8px 14px;
      background: transparent;
      color: var(--ink);
      cursor: pointer;
    }

    .tab.active {
      background: var(--calm);
      border-color: var(--calm);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      display: grid;
      gap: 6px;
      background: var(--card);
      border-radius: 16px;
      padding: 20px;
    }

    .value {
      font-size: 1.8rem;
      font-weight: 600;
    }

    .status[data-type="error"] {
      color: var(--today);
    }

    .chart-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .chart {
      position: relative;
      display: flex;
      align-items: flex-end;
      gap: 4px;
      height: 320px;
      padding-bottom: 24px;
    }

    .column {
      flex: 1;
      height: 100%;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: center;
      margin: 0;
    }

    .bar {
      width: 100%;
      border: 0;
      border-radius: 4px 4px 0 0;
      background: var(--calm);
      padding: 0;
    }

    button.bar {
      cursor: pointer;
    }

    .bar.above {
      background: var(--warn);
    }

    .bar.today {
      outline: 3px solid var(--today);
    }

    .bar.selected {
      background: var(--picked);
      outline: 3px solid var(--picked);
    }

    .reference {
      position: absolute;
      left: 0;
      right: 0;
      border-top: 1px dashed var(--muted);
      margin-bottom: 24px;
    }

    .tick {
      font-size: 0.7rem;
      margin-top: 4px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 8px;
      border-bottom: 1px solid #2a2b30;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Spending Dashboard</h1>
      <p class="subtitle">{{SUBTITLE}}</p>
    </header>
    <section class="card selector">{{SELECTOR}}</section>
    {{STATUS}}
    <section class="panel">{{KPIS}}</section>
    <section class="card">{{CHART}}</section>
    <section class="card">{{DAY}}</section>
  </main>
</body>
</html>
"#;
