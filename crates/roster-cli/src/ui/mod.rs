//! TUI rendering — orchestrates all panes.

pub mod order_list;
pub mod owner_cards;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use roster_core::api::RosterApi;

use crate::app::{App, View};

// ─── Layout ───────────────────────────────────────────────────────────────────

/// Screen regions. Computed purely from the terminal size so mouse handling
/// can hit-test against the same geometry the renderer used.
pub struct Panes {
  pub header: Rect,
  pub body:   Rect,
  pub list:   Rect,
  pub cards:  Rect,
  pub status: Rect,
}

pub fn layout(area: Rect) -> Panes {
  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  // Body: order list (30%) and owner cards (70%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(rows[1]);

  Panes {
    header: rows[0],
    body:   rows[1],
    list:   cols[0],
    cards:  cols[1],
    status: rows[2],
  }
}

impl Panes {
  /// Map a terminal coordinate to an index into the order-list rows, if it
  /// lands on one.
  pub fn list_row_at(&self, column: u16, row: u16, rows_len: usize) -> Option<usize> {
    let inner = Block::default().borders(Borders::ALL).inner(self.list);
    if column < inner.x || column >= inner.x + inner.width {
      return None;
    }
    if row < inner.y || row >= inner.y + inner.height {
      return None;
    }
    let idx = (row - inner.y) as usize;
    (idx < rows_len).then_some(idx)
  }
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<R: RosterApi>(f: &mut Frame, app: &App<R>) {
  let panes = layout(f.area());

  draw_header(f, panes.header, app);

  match &app.view {
    View::Loading => draw_notice(f, panes.body, "Loading product owners...", Color::DarkGray),
    View::Error(msg) => draw_notice(f, panes.body, msg, Color::Red),
    View::Empty => draw_notice(
      f,
      panes.body,
      "No product owners in this client group.",
      Color::DarkGray,
    ),
    View::Ready => {
      order_list::draw(f, panes.list, app);
      owner_cards::draw(f, panes.cards, app);
    }
  }

  draw_status(f, panes.status, app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<R: RosterApi>(f: &mut Frame, area: Rect, app: &App<R>) {
  let left = Span::styled(
    format!(" roster  {}", app.client_group_id),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  // Save control: label and emphasis track the dirty/saving state.
  let right = if app.saving {
    Span::styled("Saving... ", Style::default().fg(Color::Yellow))
  } else if app.order.is_dirty() {
    Span::styled(
      "[s] Save Order ",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
  } else {
    Span::styled("Save Order ", Style::default().fg(Color::DarkGray))
  };

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Notices ──────────────────────────────────────────────────────────────────

/// Full-body panel for the loading, error, and empty states.
fn draw_notice(f: &mut Frame, area: Rect, message: &str, color: Color) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      message.to_string(),
      Style::default().fg(color),
    ))),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<R: RosterApi>(f: &mut Frame, area: Rect, app: &App<R>) {
  let (mode_label, hints) = if app.filter_active {
    ("FILTER", "Type to filter  Esc clear  Enter done")
  } else if app.drag.active().is_some() {
    ("GRAB", "↑↓/jk move row  Space drop  q quit")
  } else if app.saving {
    ("SAVING", "")
  } else {
    (
      "NORMAL",
      "↑↓/jk navigate  Space grab  s save  / filter  o sort  r reload  q quit",
    )
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
