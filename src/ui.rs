use crate::chart::render_bar_chart;
use crate::models::{CrimeType, LocationArea, TrendFilters, TrendPoint, YearWindow};

pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching crime data.";

/// What the page shows in place of the chart.
pub enum ChartState<'a> {
    Loaded(&'a [TrendPoint]),
    Failed,
}

pub fn render_index(filters: &TrendFilters, chart: ChartState<'_>) -> String {
    let (chart_svg, alert) = match chart {
        ChartState::Loaded(points) => (render_bar_chart(points), String::new()),
        ChartState::Failed => (render_bar_chart(&[]), render_alert()),
    };

    let zipcode = match &filters.location {
        LocationArea::Zip(zip) => zip.as_str(),
        _ => "",
    };

    let crime_options = crime_options(filters.crime_type);
    let year_options = year_options(filters.years);
    let area_options = area_options(&filters.location);
    let years = filters.years.get().to_string();
    let headline = escape_html(&filters.headline());
    let area_text = escape_html(&filters.location.describe());
    let zipcode = escape_html(zipcode);

    fill_template(
        INDEX_HTML,
        &[
            ("CRIME_OPTIONS", crime_options.as_str()),
            ("YEAR_OPTIONS", year_options.as_str()),
            ("AREA_OPTIONS", area_options.as_str()),
            ("CRIME_TYPE", filters.crime_type.as_str()),
            ("YEARS", years.as_str()),
            ("CHART", chart_svg.as_str()),
            ("ALERT", alert.as_str()),
            ("HEADLINE", headline.as_str()),
            ("AREA_TEXT", area_text.as_str()),
            ("ZIPCODE", zipcode.as_str()),
        ],
    )
}

/// Substitutes `{{KEY}}` placeholders in a single pass, so substituted text is
/// never scanned again. Unknown keys are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn render_alert() -> String {
    format!(
        r#"<div class="alert" id="alert" role="alert"><span>{FETCH_ERROR_MESSAGE}</span><button type="button" class="alert-close" aria-label="Close">&times;</button></div>"#
    )
}

fn crime_options(selected: CrimeType) -> String {
    CrimeType::ALL
        .into_iter()
        .map(|kind| option(kind.as_str(), kind.as_str(), kind == selected))
        .collect()
}

fn year_options(selected: YearWindow) -> String {
    YearWindow::CHOICES
        .into_iter()
        .map(|years| {
            let value = years.to_string();
            option(&value, &value, years == selected.get())
        })
        .collect()
}

fn area_options(selected: &LocationArea) -> String {
    LocationArea::NAMED
        .iter()
        .map(|area| option(area.as_str(), area.label(), area == selected))
        .collect()
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(
        r#"<option value="{}"{selected}>{}</option>"#,
        escape_html(value),
        escape_html(label)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Chicago Crime Trends</title>
  <style>
    :root {
      --bg: #292929;
      --panel: #333333;
      --ink: #ffffff;
      --muted: rgba(255, 255, 255, 0.7);
      --outline: rgba(255, 255, 255, 0.5);
      --error: #d32f2f;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Roboto", "Helvetica Neue", Arial, sans-serif;
    }

    .app {
      width: min(1200px, 100%);
      margin: 0 auto;
      padding: 24px 18px 48px;
    }

    .layout {
      display: grid;
      grid-template-columns: 260px 1fr;
      gap: 28px;
    }

    .filters {
      display: grid;
      gap: 16px;
      align-content: start;
      padding: 18px;
      background: var(--panel);
      border-radius: 8px;
    }

    .filters h3 {
      margin: 0;
      font-size: 1.2rem;
      font-weight: 600;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    select,
    input {
      appearance: none;
      background: transparent;
      color: var(--ink);
      border: 1px solid var(--outline);
      border-radius: 4px;
      padding: 8px 10px;
      font-size: 0.95rem;
    }

    select:focus,
    input:focus {
      outline: none;
      border-color: var(--ink);
    }

    option {
      color: #000000;
    }

    button.apply {
      border: none;
      border-radius: 4px;
      padding: 10px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      text-transform: uppercase;
      background: var(--ink);
      color: var(--bg);
      cursor: pointer;
    }

    button.apply:disabled {
      background: rgba(255, 255, 255, 0.12);
      color: rgba(255, 255, 255, 0.3);
      cursor: default;
    }

    h2.headline {
      margin: 0 0 2em;
      text-align: center;
      font-weight: normal;
      font-size: 1.5rem;
    }

    h2.headline strong {
      font-weight: 800;
    }

    .chart {
      width: 100%;
      height: auto;
      display: block;
    }

    .chart-grid {
      stroke: rgba(255, 255, 255, 0.2);
    }

    .chart-axis {
      stroke: var(--ink);
    }

    .chart-axis-label,
    .chart-empty {
      fill: var(--ink);
      font-size: 12px;
    }

    .bar rect:hover {
      opacity: 0.8;
    }

    .alert {
      position: fixed;
      left: 50%;
      bottom: 24px;
      transform: translateX(-50%);
      display: flex;
      gap: 16px;
      align-items: center;
      padding: 12px 16px;
      border-radius: 4px;
      background: var(--error);
      color: var(--ink);
    }

    .alert-close {
      border: none;
      background: transparent;
      color: inherit;
      font-size: 1.2rem;
      cursor: pointer;
    }

    @media (max-width: 760px) {
      .layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <div class="layout">
      <form class="filters" id="filters" method="get" action="/">
        <h3>Filters</h3>
        <label>Crime Type
          <select name="crimeType">{{CRIME_OPTIONS}}</select>
        </label>
        <label>Years
          <select name="yearsToDisplay">{{YEAR_OPTIONS}}</select>
        </label>
        <label>Location
          <select name="locationArea">{{AREA_OPTIONS}}</select>
        </label>
        <label>Zip code
          <input name="zipcode" type="text" inputmode="numeric" placeholder="e.g. 60614" value="{{ZIPCODE}}" />
        </label>
        <button class="apply" id="apply" type="submit" disabled>Apply Filter</button>
      </form>

      <section class="graph">
        <h2 class="headline" title="{{HEADLINE}}">
          How many '<strong>{{CRIME_TYPE}}</strong>' crimes happened in the past
          <strong>{{YEARS}}</strong> years <strong>{{AREA_TEXT}}</strong>?
        </h2>
        {{CHART}}
      </section>
    </div>
    {{ALERT}}
  </main>

  <script>
    const form = document.getElementById('filters');
    const apply = document.getElementById('apply');

    form.querySelectorAll('select, input').forEach((control) => {
      control.addEventListener('change', () => {
        apply.disabled = false;
      });
      control.addEventListener('input', () => {
        apply.disabled = false;
      });
    });

    form.addEventListener('submit', () => {
      apply.disabled = true;
    });

    const alertEl = document.getElementById('alert');
    if (alertEl) {
      const dismiss = () => alertEl.remove();
      alertEl.querySelector('.alert-close').addEventListener('click', dismiss);
      setTimeout(dismiss, 6000);
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterParams;

    fn filters(crime: &str, years: &str, area: &str) -> TrendFilters {
        TrendFilters::from_params(&FilterParams {
            crime_type: Some(crime.to_string()),
            years_to_display: Some(years.to_string()),
            location_area: Some(area.to_string()),
            zipcode: None,
        })
        .unwrap()
    }

    #[test]
    fn index_marks_current_selection() {
        let html = render_index(&filters("Arson", "16", "west"), ChartState::Loaded(&[]));
        assert!(html.contains(r#"<option value="Arson" selected>Arson</option>"#));
        assert!(html.contains(r#"<option value="16" selected>16</option>"#));
        assert!(html.contains(r#"<option value="west" selected>West</option>"#));
        assert!(html.contains("<strong>on the west side</strong>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn index_escapes_zipcode() {
        let html = render_index(
            &filters("Theft", "4", "<b>60614</b>"),
            ChartState::Loaded(&[]),
        );
        assert!(html.contains(r#"value="&lt;b&gt;60614&lt;/b&gt;""#));
        assert!(!html.contains("<b>60614</b>"));
    }

    #[test]
    fn index_keeps_placeholder_text_in_zipcode_literal() {
        let html = render_index(
            &filters("Theft", "4", "{{AREA_TEXT}}"),
            ChartState::Loaded(&[]),
        );
        assert!(html.contains("<strong>in the zipcode {{AREA_TEXT}}</strong>"));
        assert!(html.contains(r#"value="{{AREA_TEXT}}""#));
        assert!(html.contains("past 4 years in the zipcode {{AREA_TEXT}}?"));
        assert!(!html.contains("in the zipcode in the zipcode"));
    }

    #[test]
    fn template_fill_leaves_unknown_and_unclosed_markers() {
        assert_eq!(
            fill_template("a {{X}} b {{Y}} c {{Z", &[("X", "{{Y}}")]),
            "a {{Y}} b {{Y}} c {{Z"
        );
    }

    #[test]
    fn index_shows_alert_only_on_failure() {
        let ok = render_index(&TrendFilters::default(), ChartState::Loaded(&[]));
        assert!(!ok.contains(FETCH_ERROR_MESSAGE));

        let failed = render_index(&TrendFilters::default(), ChartState::Failed);
        assert!(failed.contains(FETCH_ERROR_MESSAGE));
        assert!(failed.contains("No data"));
    }

    #[test]
    fn index_embeds_chart() {
        let points = [TrendPoint {
            year: 2024,
            crimes: 4321,
            percentage_change: Some(-1.5),
        }];
        let html = render_index(&TrendFilters::default(), ChartState::Loaded(&points));
        assert!(html.contains("4,321 crimes"));
        assert!(html.contains("- 1.5%"));
    }
}
