//! Display-order state — the current sequence, the persisted baseline, and
//! dirty tracking between them.
//!
//! Two sequences exist at all times: `current` (what the user is editing)
//! and `baseline` (the last order confirmed persisted). Their element-wise
//! equality defines whether unsaved changes exist. Ordering never creates or
//! destroys an owner; both sequences are permutations of the loaded roster.

use serde::{Deserialize, Serialize};

use crate::person::{OwnerId, ProductOwner};

// ─── Wire entry ──────────────────────────────────────────────────────────────

/// One element of the persisted order: an owner id paired with its 1-based
/// display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
  pub product_owner_id: OwnerId,
  pub display_order:    u32,
}

// ─── OrderState ──────────────────────────────────────────────────────────────

/// The current and last-persisted display orders for one client group.
#[derive(Debug, Clone, Default)]
pub struct OrderState {
  current:  Vec<OwnerId>,
  baseline: Vec<OwnerId>,
}

impl OrderState {
  /// Initialise both sequences from the roster in server-returned order.
  pub fn from_roster(roster: &[ProductOwner]) -> Self {
    let ids: Vec<OwnerId> = roster.iter().map(|o| o.id).collect();
    Self {
      current:  ids.clone(),
      baseline: ids,
    }
  }

  /// The order currently on screen.
  pub fn current(&self) -> &[OwnerId] {
    &self.current
  }

  /// Replace the current order. The caller guarantees `new_order` is a
  /// permutation of the loaded identifier set; no re-validation happens
  /// here.
  pub fn reorder(&mut self, new_order: Vec<OwnerId>) {
    self.current = new_order;
  }

  /// Whether the current order differs from the baseline. Position matters,
  /// not just membership: the same ids in a different sequence are dirty.
  pub fn is_dirty(&self) -> bool {
    self.current != self.baseline
  }

  /// Adopt the current order as the persisted baseline. Called after a
  /// successful save.
  pub fn commit(&mut self) {
    self.baseline = self.current.clone();
  }

  /// The current order as 1-based wire entries: first element gets
  /// `display_order` 1, second 2, and so on with no gaps.
  pub fn positions(&self) -> Vec<OrderEntry> {
    self
      .current
      .iter()
      .enumerate()
      .map(|(idx, &id)| OrderEntry {
        product_owner_id: id,
        display_order:    idx as u32 + 1,
      })
      .collect()
  }

  /// Whether the current order is a permutation of `ids`: same length, same
  /// members, no duplicates introduced or lost.
  pub fn is_permutation_of(&self, ids: &[OwnerId]) -> bool {
    if self.current.len() != ids.len() {
      return false;
    }
    let mut a = self.current.clone();
    let mut b = ids.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b && a.windows(2).all(|w| w[0] != w[1])
  }
}
