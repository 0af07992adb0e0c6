//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{
  KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use roster_core::{
  api::{ApiError as _, RosterApi},
  drag::DragSession,
  order::OrderState,
  person::{OwnerId, ProductOwner},
};

use crate::ui::Panes;

/// Shown when a fetch fails without a `detail` message in the payload.
pub const FETCH_FALLBACK: &str = "Failed to load product owners";
/// Shown when a save fails without a `detail` message in the payload.
pub const SAVE_FALLBACK: &str = "Failed to save order";

// ─── View ─────────────────────────────────────────────────────────────────────

/// Top-level view state: `Loading → {Error | Empty | Ready}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
  Loading,
  Error(String),
  Empty,
  Ready,
}

/// Sequence the cards pane renders in. View-only; never touches the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSort {
  DisplayOrder,
  Surname,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state for one client group.
pub struct App<R: RosterApi> {
  pub client_group_id: String,

  pub view: View,

  /// Roster records exactly as the server returned them.
  pub roster: Vec<ProductOwner>,

  /// Current and last-persisted display orders.
  pub order: OrderState,

  /// In-progress grab gesture, if any.
  pub drag: DragSession,

  /// Cursor position within the *filtered* order list.
  pub list_cursor: usize,

  /// Current fuzzy-filter string (being typed when `filter_active`).
  pub filter: String,
  pub filter_active: bool,

  pub card_sort: CardSort,

  /// Scroll offset within the cards pane.
  pub cards_scroll: usize,

  /// A save request is in flight; blocks further saves.
  pub saving: bool,

  /// Quitting with unsaved changes needs a second `q`.
  pub quit_armed: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Injected API implementation.
  pub api: Arc<R>,
}

impl<R: RosterApi> App<R> {
  pub fn new(client_group_id: String, api: Arc<R>) -> Self {
    Self {
      client_group_id,
      view: View::Loading,
      roster: Vec::new(),
      order: OrderState::default(),
      drag: DragSession::default(),
      list_cursor: 0,
      filter: String::new(),
      filter_active: false,
      card_sort: CardSort::DisplayOrder,
      cards_scroll: 0,
      saving: false,
      quit_armed: false,
      status_msg: String::new(),
      api,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the roster and reinitialise both order sequences from the server
  /// response. Also the only retry path after an error, and it discards any
  /// unsaved ordering.
  pub async fn load_roster(&mut self) {
    self.view = View::Loading;
    self.drag.end();
    self.saving = false;
    self.quit_armed = false;
    self.status_msg.clear();

    match self.api.fetch_product_owners(&self.client_group_id).await {
      Ok(owners) => {
        self.order = OrderState::from_roster(&owners);
        self.roster = owners;
        self.list_cursor = 0;
        self.cards_scroll = 0;
        self.view = if self.roster.is_empty() {
          View::Empty
        } else {
          View::Ready
        };
      }
      Err(e) => {
        tracing::warn!(error = %e, "roster fetch failed");
        self.view = View::Error(e.detail().unwrap_or(FETCH_FALLBACK).to_string());
      }
    }
  }

  /// Persist the current order. No-op unless the order is dirty and no save
  /// is already in flight. On failure the unsaved order stays as-is so the
  /// user can retry without re-dragging.
  pub async fn save_order(&mut self) {
    if self.saving || !self.order.is_dirty() || self.view != View::Ready {
      return;
    }
    self.saving = true;
    self.status_msg = "Saving...".into();

    let entries = self.order.positions();
    match self.api.save_owner_order(&self.client_group_id, &entries).await {
      Ok(()) => {
        self.order.commit();
        self.status_msg = "Order saved".into();
      }
      Err(e) => {
        tracing::warn!(error = %e, "order save failed");
        self.status_msg = e.detail().unwrap_or(SAVE_FALLBACK).to_string();
      }
    }
    self.saving = false;
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn owner(&self, id: OwnerId) -> Option<&ProductOwner> {
    self.roster.iter().find(|o| o.id == id)
  }

  /// Rows of the order list: 1-based position in the current order paired
  /// with the record, fuzzy filter applied.
  pub fn visible_rows(&self) -> Vec<(usize, &ProductOwner)> {
    let matcher = SkimMatcherV2::default();
    self
      .order
      .current()
      .iter()
      .enumerate()
      .filter_map(|(idx, &id)| self.owner(id).map(|o| (idx + 1, o)))
      .filter(|(_, o)| {
        self.filter.is_empty()
          || matcher
            .fuzzy_match(&o.display_name(), &self.filter)
            .is_some()
      })
      .collect()
  }

  /// Owners for the cards pane, with their 1-based display-order positions.
  pub fn card_owners(&self) -> Vec<(usize, &ProductOwner)> {
    let mut owners: Vec<(usize, &ProductOwner)> = self
      .order
      .current()
      .iter()
      .enumerate()
      .filter_map(|(idx, &id)| self.owner(id).map(|o| (idx + 1, o)))
      .collect();
    if self.card_sort == CardSort::Surname {
      owners.sort_by_key(|(_, o)| {
        o.surname.as_deref().unwrap_or_default().to_lowercase()
      });
    }
    owners
  }

  fn row_ids(&self) -> Vec<OwnerId> {
    self.visible_rows().into_iter().map(|(_, o)| o.id).collect()
  }

  pub fn cursor_row_id(&self) -> Option<OwnerId> {
    self.row_ids().get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere, unsaved changes or not.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return self.handle_filter_key(key);
    }

    // Any key other than a second `q` disarms the quit confirmation.
    if self.quit_armed && key.code != KeyCode::Char('q') {
      self.quit_armed = false;
      self.status_msg.clear();
    }

    match key.code {
      KeyCode::Char('q') => return self.request_quit(),

      KeyCode::Char('r') => self.load_roster().await,
      KeyCode::Char('s') => self.save_order().await,

      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),

      KeyCode::Char(' ') | KeyCode::Enter if self.view == View::Ready => {
        self.toggle_grab();
      }

      KeyCode::Char('/') if self.view == View::Ready => {
        if self.drag.active().is_some() {
          self.drag.end();
        }
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      KeyCode::Char('o') if self.view == View::Ready => {
        self.card_sort = match self.card_sort {
          CardSort::DisplayOrder => CardSort::Surname,
          CardSort::Surname => CardSort::DisplayOrder,
        };
        self.cards_scroll = 0;
      }

      KeyCode::PageDown => {
        self.cards_scroll = self.cards_scroll.saturating_add(5);
      }
      KeyCode::PageUp => {
        self.cards_scroll = self.cards_scroll.saturating_sub(5);
      }

      _ => {}
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    true
  }

  /// First `q` with unsaved changes arms a confirmation; the second quits.
  fn request_quit(&mut self) -> bool {
    if self.order.is_dirty() && !self.quit_armed {
      self.quit_armed = true;
      self.status_msg = "Unsaved order: press q again to quit".into();
      return true;
    }
    false
  }

  /// Move the list cursor. While a grab is active, entering a row fires one
  /// drag-over step against it, so the list live-animates as the cursor
  /// travels.
  fn move_cursor(&mut self, delta: isize) {
    if self.view != View::Ready {
      return;
    }
    let ids = self.row_ids();
    if ids.is_empty() {
      return;
    }
    let next = self.list_cursor.saturating_add_signed(delta).min(ids.len() - 1);
    if next == self.list_cursor {
      return;
    }
    self.list_cursor = next;
    if self.drag.active().is_some() {
      self.drag.over(ids[next], &mut self.order);
    }
  }

  /// Space grabs the cursor row or drops the grabbed one. Reordering works
  /// on the full sequence, so grabbing is unavailable while a filter hides
  /// part of it.
  fn toggle_grab(&mut self) {
    if self.drag.active().is_some() {
      self.drag.end();
      self.status_msg.clear();
      return;
    }
    if !self.filter.is_empty() {
      self.status_msg = "Clear the filter to reorder".into();
      return;
    }
    if let Some(id) = self.cursor_row_id() {
      self.drag.start(id);
      self.status_msg.clear();
    }
  }

  // ── Mouse handling ────────────────────────────────────────────────────────

  /// Left-button press on an order row starts a grab, drag motion over
  /// another row fires drag-over, release ends the gesture. Mouse and
  /// keyboard drive the same three session hooks.
  pub fn handle_mouse(&mut self, mouse: MouseEvent, panes: &Panes) {
    if self.view != View::Ready {
      return;
    }
    match mouse.kind {
      MouseEventKind::Down(MouseButton::Left) => {
        let rows = self.row_ids();
        if let Some(row) = panes.list_row_at(mouse.column, mouse.row, rows.len()) {
          self.list_cursor = row;
          if self.filter.is_empty() && !self.filter_active {
            self.drag.start(rows[row]);
          }
        }
      }
      MouseEventKind::Drag(MouseButton::Left) => {
        let rows = self.row_ids();
        if let Some(row) = panes.list_row_at(mouse.column, mouse.row, rows.len()) {
          self.list_cursor = row;
          self.drag.over(rows[row], &mut self.order);
        }
      }
      MouseEventKind::Up(MouseButton::Left) => self.drag.end(),
      MouseEventKind::ScrollDown => {
        self.cards_scroll = self.cards_scroll.saturating_add(1);
      }
      MouseEventKind::ScrollUp => {
        self.cards_scroll = self.cards_scroll.saturating_sub(1);
      }
      _ => {}
    }
  }
}
