//! Drag session — translates the grab/over/release gesture into order
//! mutations.
//!
//! The session is ephemeral: it exists from gesture start to gesture end and
//! holds only the identifier being dragged. Every `over` step applies the
//! move immediately, so the list live-animates while the gesture is in
//! progress; by the time the gesture ends the last step has already been
//! applied and `end` only clears the session.

use crate::{order::OrderState, person::OwnerId};

/// State of one in-progress drag gesture.
#[derive(Debug, Default)]
pub struct DragSession {
  dragged: Option<OwnerId>,
}

impl DragSession {
  /// Begin dragging `id`.
  pub fn start(&mut self, id: OwnerId) {
    self.dragged = Some(id);
  }

  /// The id being dragged, if a gesture is in progress.
  pub fn active(&self) -> Option<OwnerId> {
    self.dragged
  }

  /// The dragged item has passed over `target`. Moves the dragged id to the
  /// position `target` occupies and returns `true` when the order changed.
  ///
  /// No-ops: no gesture in progress, target is the dragged id itself, or
  /// either id is missing from the order (cannot happen while the order
  /// stays a permutation of the roster, but a stale event must not panic).
  ///
  /// The insertion index is the target's index in the order *before* the
  /// dragged element is removed. Dragging downwards therefore lands the item
  /// in the slot the target holds after removal; dragging upwards lands it
  /// immediately before the target. Both directions compose to the expected
  /// live-preview behaviour across repeated `over` steps.
  pub fn over(&self, target: OwnerId, order: &mut OrderState) -> bool {
    let Some(dragged) = self.dragged else {
      return false;
    };
    if dragged == target {
      return false;
    }

    let mut ids = order.current().to_vec();
    let Some(i) = ids.iter().position(|&id| id == dragged) else {
      return false;
    };
    let Some(j) = ids.iter().position(|&id| id == target) else {
      return false;
    };

    ids.remove(i);
    ids.insert(j, dragged);
    order.reorder(ids);
    true
  }

  /// End the gesture, whether or not it was over a valid target. Never
  /// mutates the order.
  pub fn end(&mut self) {
    self.dragged = None;
  }
}
