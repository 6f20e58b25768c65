// In-memory category API used by tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::api::CategoryApi;
use super::error::{Result, SyncError};
use crate::core::{Category, Widget};

/// Behaves like the real server: stores whatever widget list it receives
/// and echoes the updated category back. Can be told to fail or to answer
/// slowly.
pub struct StubApi {
    categories: Mutex<Vec<Category>>,
    patches: Mutex<Vec<(String, Vec<Widget>)>>,
    fail_status: Mutex<Option<u16>>,
    rename: Mutex<Option<String>>,
    delay: Duration,
    pub list_calls: AtomicUsize,
}

impl StubApi {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            patches: Mutex::new(Vec::new()),
            fail_status: Mutex::new(None),
            rename: Mutex::new(None),
            delay: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answer every following request with `status`
    pub fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.fail_status.lock().unwrap() = None;
    }

    /// Make the server normalize the category name on every write
    pub fn rename_on_write(&self, name: &str) {
        *self.rename.lock().unwrap() = Some(name.to_string());
    }

    /// Every PATCH received so far, in arrival order
    pub fn patches(&self) -> Vec<(String, Vec<Widget>)> {
        self.patches.lock().unwrap().clone()
    }

    fn failure(&self) -> Option<SyncError> {
        self.fail_status.lock().unwrap().map(|status| SyncError::Server {
            status,
            body: "stubbed failure".to_string(),
        })
    }
}

#[async_trait]
impl CategoryApi for StubApi {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn replace_widgets(&self, category_id: &str, widgets: &[Widget]) -> Result<Category> {
        self.patches
            .lock()
            .unwrap()
            .push((category_id.to_string(), widgets.to_vec()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(err) = self.failure() {
            return Err(err);
        }

        let rename = self.rename.lock().unwrap().clone();
        let mut categories = self.categories.lock().unwrap();
        let category = categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| SyncError::Server {
                status: 404,
                body: format!("category {} not found", category_id),
            })?;

        category.widgets = widgets.to_vec();
        if let Some(name) = rename {
            category.name = name;
        }
        Ok(category.clone())
    }
}
