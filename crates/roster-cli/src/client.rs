//! Async HTTP client for the client-group roster API.

use std::time::Duration;

use reqwest::Client;
use roster_core::{
  api::{ApiError, RosterApi},
  order::OrderEntry,
  person::ProductOwner,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Connection settings for the roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the roster JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
  /// The request never produced a response (connection, timeout, decode).
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server answered with a non-success status. `detail` carries the
  /// `detail` string from the error payload when the body had one.
  #[error("server rejected request: {status}")]
  Rejected {
    status: reqwest::StatusCode,
    detail: Option<String>,
  },
}

impl ApiError for ClientError {
  fn detail(&self) -> Option<&str> {
    match self {
      Self::Rejected { detail, .. } => detail.as_deref(),
      Self::Transport(_) => None,
    }
  }
}

/// Error payload convention: `{"detail": "<human-readable message>"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  detail: Option<String>,
}

#[derive(Serialize)]
struct OrderBody<'a> {
  order: &'a [OrderEntry],
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// Convert a non-success response into [`ClientError::Rejected`], pulling
  /// the `detail` message out of the body when it parses as the error
  /// payload convention.
  async fn rejection(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let detail = match resp.text().await {
      Ok(body) => serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail),
      Err(_) => None,
    };
    ClientError::Rejected { status, detail }
  }
}

impl RosterApi for ApiClient {
  type Error = ClientError;

  /// `GET /api/client-groups/{id}/product-owners`
  async fn fetch_product_owners(
    &self,
    client_group_id: &str,
  ) -> Result<Vec<ProductOwner>, ClientError> {
    let url = self.url(&format!("/client-groups/{client_group_id}/product-owners"));
    tracing::debug!(%url, "fetching product owners");

    let resp = self.auth(self.client.get(&url)).send().await?;
    if !resp.status().is_success() {
      return Err(Self::rejection(resp).await);
    }

    let owners: Vec<ProductOwner> = resp.json().await?;
    tracing::info!(client_group_id, count = owners.len(), "loaded product owners");
    Ok(owners)
  }

  /// `PUT /api/client-groups/{id}/product-owner-order`
  async fn save_owner_order(
    &self,
    client_group_id: &str,
    order: &[OrderEntry],
  ) -> Result<(), ClientError> {
    let url =
      self.url(&format!("/client-groups/{client_group_id}/product-owner-order"));
    tracing::debug!(%url, entries = order.len(), "saving display order");

    let resp = self
      .auth(self.client.put(&url))
      .json(&OrderBody { order })
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Self::rejection(resp).await);
    }

    tracing::info!(client_group_id, "display order saved");
    Ok(())
  }
}
