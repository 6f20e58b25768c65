// Category API
// HTTP client for the external categories endpoint

use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::error::{Result, SyncError};
use crate::core::{Category, Widget};

/// Remote source of truth for categories
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// `GET /categories`
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// `PATCH /categories/{id}` replacing the whole widget list
    async fn replace_widgets(&self, category_id: &str, widgets: &[Widget]) -> Result<Category>;
}

/// Body of the widget replacement PATCH
#[derive(Debug, Serialize)]
struct WidgetsPatch<'a> {
    widgets: &'a [Widget],
}

/// reqwest-backed [`CategoryApi`]
#[derive(Debug, Clone)]
pub struct HttpCategoryApi {
    base: Url,
    client: Client,
}

impl HttpCategoryApi {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {}", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { base, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Read the body, then classify status and shape
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CategoryApi for HttpCategoryApi {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let url = self.endpoint(&["categories"]);
        tracing::debug!(%url, "GET categories");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Self::decode(response).await
    }

    async fn replace_widgets(&self, category_id: &str, widgets: &[Widget]) -> Result<Category> {
        let url = self.endpoint(&["categories", category_id]);
        tracing::debug!(%url, widgets = widgets.len(), "PATCH category widgets");

        let response = self
            .client
            .patch(url)
            .json(&WidgetsPatch { widgets })
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Self::decode(response).await
    }
}
