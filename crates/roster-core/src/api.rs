//! The `RosterApi` trait and an in-memory reference implementation.
//!
//! The trait is the seam between the view layer and the external REST
//! collaborator. The HTTP client in the CLI crate implements it for real;
//! [`InMemoryRoster`] implements it over fixture data for tests and offline
//! demos. Views take the implementation by injection rather than reaching
//! for an ambient singleton.

use std::{collections::HashMap, future::Future, sync::Mutex};

use crate::{
  Error,
  order::OrderEntry,
  person::{OwnerId, ProductOwner},
};

// ─── Error convention ────────────────────────────────────────────────────────

/// Errors produced by a [`RosterApi`] implementation.
///
/// The server's error payload convention is `{"detail": "<message>"}`;
/// `detail` surfaces that string when the failing response carried one. The
/// caller substitutes its own generic fallback when it is absent.
pub trait ApiError: std::error::Error + Send + Sync + 'static {
  fn detail(&self) -> Option<&str> {
    None
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the client-group roster API.
///
/// All methods return `Send` futures so the trait can be driven from a
/// multi-threaded async runtime.
pub trait RosterApi: Send + Sync {
  type Error: ApiError;

  /// Fetch the product owners of a client group. The returned sequence is
  /// the server-defined display order; implementations must not sort it.
  fn fetch_product_owners<'a>(
    &'a self,
    client_group_id: &'a str,
  ) -> impl Future<Output = Result<Vec<ProductOwner>, Self::Error>> + Send + 'a;

  /// Persist a new display order for a client group. `order` carries every
  /// owner id paired with its 1-based position.
  fn save_owner_order<'a>(
    &'a self,
    client_group_id: &'a str,
    order: &'a [OrderEntry],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory implementation ────────────────────────────────────────────────

/// A [`RosterApi`] over in-process fixture data.
///
/// Saved orders are recorded verbatim and also applied to the stored roster,
/// so a subsequent fetch returns owners in the persisted sequence, the same
/// way the real server does. A single upcoming failure can be scripted with
/// [`InMemoryRoster::reject_next`].
#[derive(Debug, Default)]
pub struct InMemoryRoster {
  groups:      Mutex<HashMap<String, Vec<ProductOwner>>>,
  saved:       Mutex<Vec<(String, Vec<OrderEntry>)>>,
  reject_next: Mutex<Option<Option<String>>>,
}

impl InMemoryRoster {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style: seed a client group with its owners.
  pub fn with_group(self, client_group_id: &str, owners: Vec<ProductOwner>) -> Self {
    self.insert_group(client_group_id, owners);
    self
  }

  pub fn insert_group(&self, client_group_id: &str, owners: Vec<ProductOwner>) {
    self
      .groups
      .lock()
      .unwrap()
      .insert(client_group_id.to_string(), owners);
  }

  /// Script the next call (fetch or save) to fail, with an optional payload
  /// `detail` message.
  pub fn reject_next(&self, detail: Option<&str>) {
    *self.reject_next.lock().unwrap() = Some(detail.map(str::to_string));
  }

  /// Every order persisted so far, oldest first.
  pub fn saved_orders(&self) -> Vec<(String, Vec<OrderEntry>)> {
    self.saved.lock().unwrap().clone()
  }

  fn take_rejection(&self) -> Option<Error> {
    self
      .reject_next
      .lock()
      .unwrap()
      .take()
      .map(|detail| Error::Rejected { detail })
  }
}

impl RosterApi for InMemoryRoster {
  type Error = Error;

  async fn fetch_product_owners(
    &self,
    client_group_id: &str,
  ) -> Result<Vec<ProductOwner>, Error> {
    if let Some(err) = self.take_rejection() {
      return Err(err);
    }
    self
      .groups
      .lock()
      .unwrap()
      .get(client_group_id)
      .cloned()
      .ok_or_else(|| Error::UnknownGroup(client_group_id.to_string()))
  }

  async fn save_owner_order(
    &self,
    client_group_id: &str,
    order: &[OrderEntry],
  ) -> Result<(), Error> {
    if let Some(err) = self.take_rejection() {
      return Err(err);
    }

    let mut groups = self.groups.lock().unwrap();
    let owners = groups
      .get_mut(client_group_id)
      .ok_or_else(|| Error::UnknownGroup(client_group_id.to_string()))?;

    // Re-sequence the stored roster to the persisted order.
    let position: HashMap<OwnerId, u32> = order
      .iter()
      .map(|e| (e.product_owner_id, e.display_order))
      .collect();
    owners.sort_by_key(|o| position.get(&o.id).copied().unwrap_or(u32::MAX));

    self
      .saved
      .lock()
      .unwrap()
      .push((client_group_id.to_string(), order.to_vec()));
    Ok(())
  }
}
