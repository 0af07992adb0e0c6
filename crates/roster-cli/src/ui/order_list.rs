//! Order list pane — left panel, the drag surface.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use roster_core::api::RosterApi;

use crate::app::App;

/// Render the order list into `area`.
pub fn draw<R: RosterApi>(f: &mut Frame, area: Rect, app: &App<R>) {
  let rows = app.visible_rows();
  let total = app.roster.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Owners ({}/{}) ", rows.len(), total)
  } else {
    format!(" Owners ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  // Build list items: "1. Name", grabbed row marked and highlighted.
  let items: Vec<ListItem> = rows
    .iter()
    .enumerate()
    .map(|(i, (pos, owner))| {
      let grabbed = app.drag.active() == Some(owner.id);
      let is_cursor = i == app.list_cursor;

      let style = if grabbed {
        Style::default()
          .bg(Color::Yellow)
          .fg(Color::Black)
          .add_modifier(Modifier::BOLD)
      } else if is_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else if owner.is_inactive() {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default()
      };

      let marker = if grabbed { "◆ " } else { "  " };

      ListItem::new(Line::from(vec![
        Span::styled(format!("{marker}{pos:>2}. "), style),
        Span::styled(owner.display_name(), style),
      ]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // If a filter is active or set, show a filter bar at the bottom.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  // Scrollable list with cursor tracking.
  let mut state = ListState::default();
  state.select(if rows.is_empty() {
    None
  } else {
    Some(app.list_cursor.min(rows.len() - 1))
  });

  f.render_stateful_widget(
    List::new(items).highlight_symbol(""),
    inner_area,
    &mut state,
  );
}
