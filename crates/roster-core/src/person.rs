//! Product owner — the person record belonging to a client group.
//!
//! Records are created and destroyed entirely by the server; the client only
//! reads them and rearranges their display order. Every non-identity field is
//! optional so a sparse record never fails to deserialize.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier, immutable once assigned and unique within a
/// client group.
pub type OwnerId = i64;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a product owner.
///
/// Anything the server sends outside the known set (including the empty
/// string) lands on [`OwnerStatus::Unknown`] and is treated as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerStatus {
  Active,
  Lapsed,
  Deceased,
  Historical,
  #[serde(other)]
  Unknown,
}

impl OwnerStatus {
  /// Whether this status gets the de-emphasised visual treatment.
  pub fn is_inactive(self) -> bool {
    matches!(self, Self::Lapsed | Self::Deceased | Self::Historical)
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Lapsed => "lapsed",
      Self::Deceased => "deceased",
      Self::Historical => "historical",
      Self::Unknown => "active",
    }
  }
}

// ─── ProductOwner ────────────────────────────────────────────────────────────

/// A person associated with a client group, exactly as returned by the
/// server. The sequence the server returns them in is the initial display
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOwner {
  pub id: OwnerId,

  // Name parts
  #[serde(default)]
  pub title:        Option<String>,
  #[serde(default)]
  pub first_name:   Option<String>,
  #[serde(default)]
  pub middle_names: Option<String>,
  #[serde(default)]
  pub surname:      Option<String>,
  #[serde(default)]
  pub known_as:     Option<String>,

  #[serde(default)]
  pub status: Option<OwnerStatus>,

  #[serde(default)]
  pub date_of_birth: Option<NaiveDate>,

  // Contact
  #[serde(default)]
  pub email:           Option<String>,
  #[serde(default)]
  pub secondary_email: Option<String>,
  #[serde(default)]
  pub home_phone:      Option<String>,
  #[serde(default)]
  pub mobile_phone:    Option<String>,

  // Address (free-text lines)
  #[serde(default)]
  pub address_line_1: Option<String>,
  #[serde(default)]
  pub address_line_2: Option<String>,
  #[serde(default)]
  pub address_line_3: Option<String>,
  #[serde(default)]
  pub address_line_4: Option<String>,
  #[serde(default)]
  pub address_line_5: Option<String>,

  // Compliance
  #[serde(default)]
  pub aml_result:        Option<String>,
  #[serde(default)]
  pub aml_date:          Option<NaiveDate>,
  #[serde(default)]
  pub passport_expiry:   Option<NaiveDate>,
  #[serde(default)]
  pub ni_number:         Option<String>,
  #[serde(default)]
  pub occupation:        Option<String>,
  #[serde(default)]
  pub employment_status: Option<String>,
}

impl ProductOwner {
  /// Whether the owner's status warrants the dimmed rendering. An absent
  /// status means active.
  pub fn is_inactive(&self) -> bool {
    self.status.is_some_and(OwnerStatus::is_inactive)
  }

  /// Assembled display name: title, first name, middle names, surname, with
  /// the known-as name quoted after. Falls back to the id when every name
  /// part is absent.
  pub fn display_name(&self) -> String {
    let parts: Vec<&str> = [
      self.title.as_deref(),
      self.first_name.as_deref(),
      self.middle_names.as_deref(),
      self.surname.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();

    let mut name = parts.join(" ");
    if let Some(known_as) = self.known_as.as_deref()
      && !known_as.is_empty()
    {
      if name.is_empty() {
        name = known_as.to_string();
      } else {
        name.push_str(&format!(" \u{201c}{known_as}\u{201d}"));
      }
    }

    if name.is_empty() {
      name = format!("Owner {}", self.id);
    }
    name
  }

  /// Age in whole years as of `today`, or `None` without a date of birth.
  ///
  /// Calendar-aware: the year difference is reduced by one when `today`
  /// falls before the birthday in the year.
  pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
    let dob = self.date_of_birth?;
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
      age -= 1;
    }
    Some(age)
  }

  /// Non-empty address lines, in order.
  pub fn address_lines(&self) -> Vec<&str> {
    [
      self.address_line_1.as_deref(),
      self.address_line_2.as_deref(),
      self.address_line_3.as_deref(),
      self.address_line_4.as_deref(),
      self.address_line_5.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect()
  }
}
