//! Unit tests for the order, drag, and person logic.

use chrono::NaiveDate;

use crate::{
  Error,
  api::{ApiError as _, InMemoryRoster, RosterApi},
  drag::DragSession,
  order::OrderState,
  person::{OwnerId, OwnerStatus, ProductOwner},
};

fn owner(id: OwnerId, first: &str, surname: &str) -> ProductOwner {
  ProductOwner {
    id,
    title: None,
    first_name: Some(first.into()),
    middle_names: None,
    surname: Some(surname.into()),
    known_as: None,
    status: None,
    date_of_birth: None,
    email: None,
    secondary_email: None,
    home_phone: None,
    mobile_phone: None,
    address_line_1: None,
    address_line_2: None,
    address_line_3: None,
    address_line_4: None,
    address_line_5: None,
    aml_result: None,
    aml_date: None,
    passport_expiry: None,
    ni_number: None,
    occupation: None,
    employment_status: None,
  }
}

fn roster(ids: &[OwnerId]) -> Vec<ProductOwner> {
  ids
    .iter()
    .map(|&id| owner(id, &format!("P{id}"), "Test"))
    .collect()
}

// ─── OrderState ──────────────────────────────────────────────────────────────

#[test]
fn from_roster_uses_server_sequence_and_is_clean() {
  let state = OrderState::from_roster(&roster(&[30, 10, 20]));
  assert_eq!(state.current(), &[30, 10, 20]);
  assert!(!state.is_dirty());
}

#[test]
fn reorder_marks_dirty_even_with_same_membership() {
  let mut state = OrderState::from_roster(&roster(&[1, 2, 3]));
  state.reorder(vec![2, 1, 3]);
  assert!(state.is_dirty());
}

#[test]
fn commit_adopts_current_as_baseline() {
  let mut state = OrderState::from_roster(&roster(&[1, 2, 3]));
  state.reorder(vec![3, 2, 1]);
  assert!(state.is_dirty());

  state.commit();
  assert!(!state.is_dirty());
  assert_eq!(state.current(), &[3, 2, 1]);
}

#[test]
fn positions_are_one_based_and_gapless() {
  let mut state = OrderState::from_roster(&roster(&[7, 5, 9]));
  state.reorder(vec![9, 7, 5]);

  let entries = state.positions();
  assert_eq!(
    entries
      .iter()
      .map(|e| (e.product_owner_id, e.display_order))
      .collect::<Vec<_>>(),
    vec![(9, 1), (7, 2), (5, 3)],
  );
}

#[test]
fn permutation_predicate() {
  let mut state = OrderState::from_roster(&roster(&[1, 2, 3]));
  assert!(state.is_permutation_of(&[3, 1, 2]));

  state.reorder(vec![1, 2]);
  assert!(!state.is_permutation_of(&[1, 2, 3]));

  state.reorder(vec![1, 1, 2]);
  assert!(!state.is_permutation_of(&[1, 2, 3]));
}

// ─── DragSession ─────────────────────────────────────────────────────────────

#[test]
fn drag_first_onto_second_swaps_two() {
  let mut order = OrderState::from_roster(&roster(&[1, 2]));
  let mut drag = DragSession::default();

  drag.start(1);
  assert!(drag.over(2, &mut order));
  drag.end();

  assert_eq!(order.current(), &[2, 1]);
  assert!(drag.active().is_none());
}

#[test]
fn drag_downwards_lands_after_target() {
  // i < j: the removal shifts the tail left, so inserting at the target's
  // pre-removal index places the dragged item one past the target.
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3, 4]));
  let mut drag = DragSession::default();

  drag.start(1);
  assert!(drag.over(3, &mut order));
  assert_eq!(order.current(), &[2, 3, 1, 4]);
}

#[test]
fn drag_upwards_lands_before_target() {
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3, 4]));
  let mut drag = DragSession::default();

  drag.start(4);
  assert!(drag.over(2, &mut order));
  assert_eq!(order.current(), &[1, 4, 2, 3]);
}

#[test]
fn drag_onto_itself_is_a_noop() {
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3]));
  let mut drag = DragSession::default();

  drag.start(2);
  assert!(!drag.over(2, &mut order));
  assert_eq!(order.current(), &[1, 2, 3]);
}

#[test]
fn over_without_active_session_is_a_noop() {
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3]));
  let drag = DragSession::default();

  assert!(!drag.over(1, &mut order));
  assert_eq!(order.current(), &[1, 2, 3]);
}

#[test]
fn over_with_unknown_ids_is_a_noop() {
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3]));
  let mut drag = DragSession::default();

  drag.start(99);
  assert!(!drag.over(2, &mut order));

  drag.start(1);
  assert!(!drag.over(99, &mut order));
  assert_eq!(order.current(), &[1, 2, 3]);
}

#[test]
fn end_clears_session_without_touching_order() {
  let mut order = OrderState::from_roster(&roster(&[1, 2, 3]));
  let mut drag = DragSession::default();

  drag.start(3);
  drag.over(1, &mut order);
  let before_end = order.current().to_vec();
  drag.end();

  assert_eq!(order.current(), before_end.as_slice());
  assert!(drag.active().is_none());
}

#[test]
fn long_drag_sequences_stay_permutations() {
  let ids = [10, 20, 30, 40, 50, 60];
  let mut order = OrderState::from_roster(&roster(&ids));
  let mut drag = DragSession::default();

  // A zig-zag of grabs and passes, including repeats over the same target.
  let gestures: &[(OwnerId, &[OwnerId])] = &[
    (10, &[20, 30, 40, 40, 30]),
    (60, &[50, 40, 30, 20, 10]),
    (30, &[60, 10, 60]),
    (50, &[10]),
  ];
  for &(grab, passes) in gestures {
    drag.start(grab);
    for &target in passes {
      drag.over(target, &mut order);
      assert!(order.is_permutation_of(&ids));
    }
    drag.end();
  }
}

// ─── Status & age ────────────────────────────────────────────────────────────

#[test]
fn inactive_statuses() {
  assert!(OwnerStatus::Lapsed.is_inactive());
  assert!(OwnerStatus::Deceased.is_inactive());
  assert!(OwnerStatus::Historical.is_inactive());
  assert!(!OwnerStatus::Active.is_inactive());
  assert!(!OwnerStatus::Unknown.is_inactive());

  let mut o = owner(1, "Ann", "Archer");
  assert!(!o.is_inactive());
  o.status = Some(OwnerStatus::Deceased);
  assert!(o.is_inactive());
}

#[test]
fn age_is_calendar_aware() {
  let mut o = owner(1, "Ann", "Archer");
  o.date_of_birth = Some(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());

  let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
  let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
  let later = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();

  assert_eq!(o.age_on(day_before), Some(33));
  assert_eq!(o.age_on(birthday), Some(34));
  assert_eq!(o.age_on(later), Some(34));

  o.date_of_birth = None;
  assert_eq!(o.age_on(birthday), None);
}

#[test]
fn display_name_assembly() {
  let mut o = owner(1, "John", "Smith");
  o.title = Some("Dr".into());
  o.middle_names = Some("Michael".into());
  o.known_as = Some("Jack".into());
  assert_eq!(o.display_name(), "Dr John Michael Smith \u{201c}Jack\u{201d}");

  let anonymous = owner(42, "", "");
  assert_eq!(anonymous.display_name(), "Owner 42");
}

// ─── Serde tolerance ─────────────────────────────────────────────────────────

#[test]
fn sparse_record_deserializes() {
  let o: ProductOwner = serde_json::from_str(r#"{"id": 7}"#).unwrap();
  assert_eq!(o.id, 7);
  assert!(o.status.is_none());
  assert!(!o.is_inactive());
  assert!(o.address_lines().is_empty());
}

#[test]
fn unknown_status_strings_read_as_active() {
  let o: ProductOwner =
    serde_json::from_str(r#"{"id": 1, "status": ""}"#).unwrap();
  assert_eq!(o.status, Some(OwnerStatus::Unknown));
  assert!(!o.is_inactive());

  let o: ProductOwner =
    serde_json::from_str(r#"{"id": 1, "status": "archived"}"#).unwrap();
  assert_eq!(o.status, Some(OwnerStatus::Unknown));

  let o: ProductOwner =
    serde_json::from_str(r#"{"id": 1, "status": "lapsed"}"#).unwrap();
  assert!(o.is_inactive());
}

#[test]
fn order_entries_serialize_to_wire_shape() {
  let state = OrderState::from_roster(&roster(&[4, 2]));
  let body = serde_json::json!({ "order": state.positions() });
  assert_eq!(
    body,
    serde_json::json!({
      "order": [
        { "product_owner_id": 4, "display_order": 1 },
        { "product_owner_id": 2, "display_order": 2 },
      ]
    }),
  );
}

// ─── InMemoryRoster ──────────────────────────────────────────────────────────

#[tokio::test]
async fn in_memory_fetch_and_save_round_trip() {
  let api = InMemoryRoster::new().with_group("cg-1", roster(&[1, 2, 3]));

  let owners = api.fetch_product_owners("cg-1").await.unwrap();
  assert_eq!(owners.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 2, 3]);

  let mut state = OrderState::from_roster(&owners);
  state.reorder(vec![3, 1, 2]);
  api.save_owner_order("cg-1", &state.positions()).await.unwrap();

  // The stored roster now comes back in the persisted sequence.
  let owners = api.fetch_product_owners("cg-1").await.unwrap();
  assert_eq!(owners.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 1, 2]);

  let saved = api.saved_orders();
  assert_eq!(saved.len(), 1);
  assert_eq!(saved[0].0, "cg-1");
}

#[tokio::test]
async fn in_memory_unknown_group_and_scripted_rejection() {
  let api = InMemoryRoster::new().with_group("cg-1", roster(&[1]));

  let err = api.fetch_product_owners("nope").await.unwrap_err();
  assert!(matches!(err, Error::UnknownGroup(_)));
  assert!(err.detail().is_none());

  api.reject_next(Some("Custom message"));
  let err = api.fetch_product_owners("cg-1").await.unwrap_err();
  assert_eq!(err.detail(), Some("Custom message"));

  // The rejection is consumed; the next call succeeds.
  assert!(api.fetch_product_owners("cg-1").await.is_ok());
}
