//! Owner cards pane — right panel, one card per product owner.

use chrono::{Local, NaiveDate};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use roster_core::{api::RosterApi, person::ProductOwner};

use crate::app::{App, CardSort};

/// Render the owner cards into `area`.
pub fn draw<R: RosterApi>(f: &mut Frame, area: Rect, app: &App<R>) {
  let title = match app.card_sort {
    CardSort::DisplayOrder => " Product Owners ",
    CardSort::Surname => " Product Owners (A-Z) ",
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let today = Local::now().date_naive();

  let mut lines: Vec<Line> = Vec::new();
  for (pos, owner) in app.card_owners() {
    card_lines(&mut lines, pos, owner, today);
    lines.push(Line::from(""));
  }

  let para = Paragraph::new(lines).scroll((app.cards_scroll as u16, 0));
  f.render_widget(para, inner);
}

// ─── Card formatting ──────────────────────────────────────────────────────────

/// Append one owner's card. Inactive owners (lapsed, deceased, historical)
/// render entirely in the dimmed style.
fn card_lines(
  lines: &mut Vec<Line<'_>>,
  pos: usize,
  owner: &ProductOwner,
  today: NaiveDate,
) {
  let dim = owner.is_inactive();
  let base = if dim {
    Style::default().fg(Color::DarkGray)
  } else {
    Style::default()
  };
  let label_style = if dim { base } else { Style::default().fg(Color::Cyan) };

  // Name line with status badge.
  let mut name_spans = vec![Span::styled(
    format!("{pos}. {}", owner.display_name()),
    base.add_modifier(Modifier::BOLD),
  )];
  if let Some(status) = owner.status
    && status.is_inactive()
  {
    name_spans.push(Span::styled(format!("  [{}]", status.label()), base));
  }
  lines.push(Line::from(name_spans));

  let born = match owner.date_of_birth {
    Some(dob) => {
      let age = owner
        .age_on(today)
        .map(|a| format!(" ({a})"))
        .unwrap_or_default();
      format!("{}{age}", dob.format("%Y-%m-%d"))
    }
    None => "—".to_string(),
  };
  push_field(lines, "born", born, label_style, base);

  push_field(
    lines,
    "email",
    join_values(&[owner.email.as_deref(), owner.secondary_email.as_deref()]),
    label_style,
    base,
  );
  push_field(
    lines,
    "phone",
    join_values(&[owner.home_phone.as_deref(), owner.mobile_phone.as_deref()]),
    label_style,
    base,
  );

  let address = owner.address_lines().join(", ");
  push_field(
    lines,
    "address",
    if address.is_empty() { "—".into() } else { address },
    label_style,
    base,
  );

  push_field(
    lines,
    "ni number",
    value_or_dash(owner.ni_number.as_deref()),
    label_style,
    base,
  );

  let aml = match (owner.aml_result.as_deref(), owner.aml_date) {
    (Some(result), Some(date)) => format!("{result} ({})", date.format("%Y-%m-%d")),
    (Some(result), None) => result.to_string(),
    (None, _) => "—".to_string(),
  };
  push_field(lines, "aml", aml, label_style, base);

  let passport = match owner.passport_expiry {
    Some(date) => format!("expires {}", date.format("%Y-%m-%d")),
    None => "—".to_string(),
  };
  push_field(lines, "passport", passport, label_style, base);

  push_field(
    lines,
    "occupation",
    join_values(&[
      owner.occupation.as_deref(),
      owner.employment_status.as_deref(),
    ]),
    label_style,
    base,
  );
}

fn push_field(
  lines: &mut Vec<Line<'_>>,
  label: &'static str,
  value: String,
  label_style: Style,
  value_style: Style,
) {
  lines.push(Line::from(vec![
    Span::styled(format!("  {label:<11}"), label_style),
    Span::styled(value, value_style),
  ]));
}

fn value_or_dash(value: Option<&str>) -> String {
  match value {
    Some(v) if !v.is_empty() => v.to_string(),
    _ => "—".to_string(),
  }
}

/// Join the present values with a separator dot; "—" when none are present.
fn join_values(values: &[Option<&str>]) -> String {
  let present: Vec<&str> = values
    .iter()
    .copied()
    .flatten()
    .filter(|v| !v.is_empty())
    .collect();
  if present.is_empty() {
    "—".to_string()
  } else {
    present.join(" · ")
  }
}
