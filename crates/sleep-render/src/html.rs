//! Static HTML report with a Chart.js bar chart and error bars.
//!
//! The document loads Chart.js and the `chartjs-chart-error-bars` plugin
//! from a CDN; everything else is inline.

use std::fmt::Write as _;

use sleep_core::error::{Result, SleepError};
use sleep_core::formatting::{format_decimal, format_hours, format_nights, format_period};
use sleep_core::statistics::DayStatistics;
use sleep_data::analysis::SleepReport;

use crate::ReportRenderer;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";
const ERROR_BARS_URL: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-chart-error-bars@4.4.5/build/index.umd.min.js";

/// One RGB triple per weekday, Sunday first.
const BAR_COLORS: [(u8, u8, u8); 7] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
    (199, 199, 199),
];

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
        }
        h1 { color: #333; text-align: center; margin-bottom: 10px; }
        h2 { color: #333; margin-bottom: 15px; }
        .subtitle { text-align: center; color: #666; margin-bottom: 30px; }
        .panel {
            background: white;
            border-radius: 8px;
            padding: 20px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            margin-bottom: 30px;
        }
        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin-top: 15px;
        }
        .stat-card {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #4CAF50;
        }
        .stat-label {
            font-size: 0.85em;
            color: #666;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }
        .stat-value { font-size: 1.5em; color: #333; font-weight: bold; margin-top: 5px; }
        .day-stats-table { width: 100%; border-collapse: collapse; margin-top: 15px; }
        .day-stats-table th, .day-stats-table td {
            padding: 12px;
            text-align: left;
            border-bottom: 1px solid #ddd;
        }
        .day-stats-table th { background-color: #4CAF50; color: white; font-weight: 600; }
        .day-stats-table tr:hover { background-color: #f5f5f5; }
        .day-stats-table td:not(:first-child) { text-align: center; }
"#;

/// Renders a [`SleepReport`] as a standalone HTML page.
#[derive(Debug, Clone)]
pub struct HtmlReport {
    /// Page title and heading. Escaped on output.
    pub title: String,
}

impl HtmlReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl ReportRenderer for HtmlReport {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, report: &SleepReport) -> Result<String> {
        let title = escape_html(&self.title);
        let subtitle = format!(
            "Analysis of {} of sleep across {}",
            format_nights(report.total_nights()),
            format_period(report.metadata.first_night, report.metadata.last_night),
        );

        let labels = to_json(&report.labels)?;
        let averages = to_json(&report.chart_averages)?;
        let std_devs = to_json(&report.chart_std_devs)?;
        let background = to_json(&bar_colors(0.7))?;
        let border = to_json(&bar_colors(1.0))?;

        let mut html = String::with_capacity(16 * 1024);
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{CHART_JS_URL}"></script>
    <script src="{ERROR_BARS_URL}"></script>
    <style>{STYLE}    </style>
</head>
<body>
    <h1>&#128164; {title}</h1>
    <p class="subtitle">{subtitle}</p>

    <div class="panel">
        <h2>Overall Statistics</h2>
        <div class="stats-grid">
{overall_cards}        </div>
    </div>

    <div class="panel">
        <h2>Average Sleep by Day of Week</h2>
        <canvas id="sleepChart"></canvas>
    </div>

    <div class="panel">
        <h2>Detailed Statistics by Day of Week</h2>
        <table class="day-stats-table">
            <thead>
                <tr>
                    <th>Day</th>
                    <th>Count</th>
                    <th>Average</th>
                    <th>Std Dev</th>
                    <th>Min</th>
                    <th>Max</th>
                </tr>
            </thead>
            <tbody>
{day_rows}            </tbody>
        </table>
    </div>

    <script>
        Chart.register(ChartErrorBars.BarWithErrorBarsController, ChartErrorBars.BarWithErrorBar);

        const averages = {averages};
        const stdDevs = {std_devs};
        const points = averages.map((avg, i) => ({{
            y: avg,
            yMin: avg - stdDevs[i],
            yMax: avg + stdDevs[i]
        }}));

        new Chart(document.getElementById('sleepChart').getContext('2d'), {{
            type: ChartErrorBars.BarWithErrorBarsController.id,
            data: {{
                labels: {labels},
                datasets: [{{
                    label: 'Average Sleep Hours',
                    data: points,
                    backgroundColor: {background},
                    borderColor: {border},
                    borderWidth: 2
                }}]
            }},
            options: {{
                responsive: true,
                plugins: {{
                    legend: {{ display: false }},
                    tooltip: {{
                        callbacks: {{
                            label: function(context) {{
                                const avg = averages[context.dataIndex];
                                const sd = stdDevs[context.dataIndex];
                                return [
                                    'Average: ' + avg.toFixed(2) + ' hours',
                                    'Std Dev: ±' + sd.toFixed(2) + ' hours',
                                    'Range: ' + (avg - sd).toFixed(2) + ' - ' + (avg + sd).toFixed(2) + ' hrs'
                                ];
                            }}
                        }}
                    }}
                }},
                scales: {{
                    y: {{
                        beginAtZero: true,
                        title: {{ display: true, text: 'Hours of Sleep', font: {{ size: 14, weight: 'bold' }} }},
                        ticks: {{ callback: function(value) {{ return value.toFixed(1) + ' hrs'; }} }}
                    }},
                    x: {{
                        title: {{ display: true, text: 'Day of Week', font: {{ size: 14, weight: 'bold' }} }}
                    }}
                }}
            }}
        }});
    </script>
</body>
</html>
"##,
            overall_cards = overall_cards(&report.overall),
            day_rows = day_rows(report),
        );

        Ok(html)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn overall_cards(overall: &DayStatistics) -> String {
    let cards = [
        ("Total Nights", overall.count.to_string()),
        ("Average Sleep", format_hours(overall.average)),
        ("Standard Deviation", format_hours(overall.std_dev)),
        ("Min Sleep", format_hours(overall.min)),
        ("Max Sleep", format_hours(overall.max)),
    ];

    let mut out = String::new();
    for (label, value) in cards {
        let _ = writeln!(
            out,
            r#"            <div class="stat-card">
                <div class="stat-label">{label}</div>
                <div class="stat-value">{value}</div>
            </div>"#
        );
    }
    out
}

fn day_rows(report: &SleepReport) -> String {
    let mut out = String::new();
    for day in &report.days {
        let s = &day.statistics;
        let _ = writeln!(
            out,
            r#"                <tr>
                    <td><strong>{}</strong></td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                </tr>"#,
            escape_html(&day.label),
            s.count,
            format_hours(s.average),
            format_hours(s.std_dev),
            format_hours(s.min),
            format_hours(s.max),
        );
    }
    out
}

fn bar_colors(alpha: f64) -> Vec<String> {
    BAR_COLORS
        .iter()
        .map(|(r, g, b)| format!("rgba({r}, {g}, {b}, {})", format_decimal(alpha, 1)))
        .collect()
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| SleepError::Render {
        renderer: "html",
        source,
    })
}

/// Escape text for use in HTML element content and attribute values.
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

// ── Tests ─────────────────────────────────────────────────────────────────────
