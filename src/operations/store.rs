// Sync Store
// Keeps local categories in step with the category API

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{watch, Mutex as AsyncMutex};
use tracing::{info, warn};

use super::api::CategoryApi;
use super::error::{Precondition, Result, SyncError};
use super::snapshot::Snapshot;
use crate::core::{Category, Widget};

/// Owner of the dashboard's categories and widgets
///
/// Local state only changes when a request settles successfully; the server's
/// response is taken as authoritative. Writes to the same category are
/// serialized, so each write computes its widget list from the state the
/// previous write committed. Writes to different categories run concurrently.
/// Widget ids are unique across the store: an id being added anywhere is
/// reserved until that add settles.
///
/// Subscribers receive a fresh [`Snapshot`] after every committed change.
pub struct SyncStore {
    api: Arc<dyn CategoryApi>,
    state: watch::Sender<Snapshot>,
    write_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    pending_ids: Mutex<HashSet<String>>,
}

/// Widget id held by an in-flight add; released on drop
struct IdReservation<'a> {
    pending: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for IdReservation<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl std::fmt::Debug for SyncStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.state.borrow();
        f.debug_struct("SyncStore")
            .field("categories", &snapshot.categories().len())
            .field("widgets", &snapshot.all_widgets().len())
            .finish_non_exhaustive()
    }
}

impl SyncStore {
    /// Create an empty store backed by `api`
    pub fn new(api: Arc<dyn CategoryApi>) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            api,
            state,
            write_locks: Mutex::new(HashMap::new()),
            pending_ids: Mutex::new(HashSet::new()),
        }
    }

    /// Current categories and flattened widgets
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Receive a notification after every committed change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Fetch the full category collection and replace local state with it
    ///
    /// Returns the number of categories loaded. On failure the previous
    /// state is kept.
    pub async fn load(&self) -> Result<usize> {
        let categories = self
            .api
            .list_categories()
            .await
            .inspect_err(|err| report("load", err))?;

        let count = categories.len();
        self.state.send_replace(Snapshot::new(categories));
        info!(categories = count, "categories loaded");

        Ok(count)
    }

    /// Append `widget` to a category
    ///
    /// The full new widget list is sent to the server. The category must
    /// exist locally and the widget id must not be in use; otherwise no
    /// request is made.
    pub async fn add_widget(&self, category_id: &str, widget: Widget) -> Result<()> {
        self.require_category(category_id)
            .inspect_err(|err| report("add_widget", err))?;
        let _reservation = self
            .reserve_id(&widget.id)
            .inspect_err(|err| report("add_widget", err))?;

        let lock = self.write_lock(category_id);
        let _guard = lock.lock().await;

        let current = self.snapshot();
        let category = current
            .category(category_id)
            .ok_or_else(|| Precondition::UnknownCategory(category_id.to_string()))
            .map_err(SyncError::from)
            .inspect_err(|err| report("add_widget", err))?;

        if current.contains_widget(&widget.id) {
            let err = SyncError::from(Precondition::DuplicateWidget(widget.id.clone()));
            report("add_widget", &err);
            return Err(err);
        }

        let widget_id = widget.id.clone();
        let widgets = category.widgets_with(widget);
        let updated = self
            .api
            .replace_widgets(category_id, &widgets)
            .await
            .inspect_err(|err| report("add_widget", err))?;

        self.commit(category_id, updated);
        info!(category_id, widget_id = %widget_id, "widget added");

        Ok(())
    }

    /// Remove the widget `widget_id` from a category
    ///
    /// An id that is not present still sends the unchanged list, so a repeated
    /// delete is a harmless round trip rather than an error.
    pub async fn delete_widget(&self, category_id: &str, widget_id: &str) -> Result<()> {
        self.require_category(category_id)
            .inspect_err(|err| report("delete_widget", err))?;

        let lock = self.write_lock(category_id);
        let _guard = lock.lock().await;

        let current = self.snapshot();
        let category = current
            .category(category_id)
            .ok_or_else(|| Precondition::UnknownCategory(category_id.to_string()))
            .map_err(SyncError::from)
            .inspect_err(|err| report("delete_widget", err))?;

        let widgets = category.widgets_without(widget_id);
        let updated = self
            .api
            .replace_widgets(category_id, &widgets)
            .await
            .inspect_err(|err| report("delete_widget", err))?;

        self.commit(category_id, updated);
        info!(category_id, widget_id, "widget deleted");

        Ok(())
    }

    fn require_category(&self, category_id: &str) -> Result<()> {
        if self.state.borrow().category(category_id).is_some() {
            Ok(())
        } else {
            Err(Precondition::UnknownCategory(category_id.to_string()).into())
        }
    }

    /// Claim `widget_id` for an add, unless it is committed or already claimed
    fn reserve_id(&self, widget_id: &str) -> Result<IdReservation<'_>> {
        let mut pending = self.pending_ids.lock().unwrap_or_else(PoisonError::into_inner);
        if self.state.borrow().contains_widget(widget_id) || !pending.insert(widget_id.to_string()) {
            return Err(Precondition::DuplicateWidget(widget_id.to_string()).into());
        }

        Ok(IdReservation {
            pending: &self.pending_ids,
            id: widget_id.to_string(),
        })
    }

    /// Per-category write lock, created on first use
    fn write_lock(&self, category_id: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.write_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(category_id.to_string()).or_default())
    }

    /// Replace one category with the server's version and notify subscribers
    fn commit(&self, category_id: &str, updated: Category) {
        self.state
            .send_modify(|snapshot| *snapshot = snapshot.with_category(category_id, updated));
    }
}

fn report(operation: &str, err: &SyncError) {
    warn!(operation, kind = err.kind(), error = %err, "category sync failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::stub::StubApi;
    use std::time::Duration;

    fn clock() -> Widget {
        Widget::with_id("w1", "Clock", "12:00")
    }

    fn alerts() -> Widget {
        Widget::with_id("w2", "Alerts", "3 open")
    }

    async fn loaded_store(api: &Arc<StubApi>) -> SyncStore {
        let store = SyncStore::new(api.clone());
        store.load().await.unwrap();
        store
    }

    fn assert_flattened(snapshot: &Snapshot) {
        let expected: Vec<Widget> = snapshot
            .categories()
            .iter()
            .flat_map(|c| c.widgets.clone())
            .collect();
        assert_eq!(snapshot.all_widgets(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_load_replaces_state_and_flattens() {
        let api = Arc::new(StubApi::new(vec![
            Category::new("c1", "General", vec![clock()]),
            Category::new("c2", "Security", vec![alerts()]),
        ]));
        let store = SyncStore::new(api.clone());

        assert_eq!(store.load().await.unwrap(), 2);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.categories().len(), 2);
        assert_eq!(snapshot.all_widgets(), &[clock(), alerts()]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_state() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![clock()])]));
        let store = loaded_store(&api).await;
        let before = store.snapshot();

        api.fail_with(503);
        let err = store.load().await.unwrap_err();

        assert_eq!(err.kind(), "server");
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_initial_failed_load_leaves_store_empty() {
        let api = Arc::new(StubApi::new(vec![]));
        api.fail_with(500);
        let store = SyncStore::new(api.clone());

        assert!(store.load().await.is_err());
        assert!(store.snapshot().is_empty());
        assert!(store.snapshot().all_widgets().is_empty());
    }

    #[tokio::test]
    async fn test_add_round_trip() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;

        store.add_widget("c1", clock()).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.categories()[0].widgets, vec![clock()]);
        assert_eq!(snapshot.all_widgets(), &[clock()]);
        assert_eq!(api.patches(), vec![("c1".to_string(), vec![clock()])]);
    }

    #[tokio::test]
    async fn test_add_to_unknown_category_issues_no_request() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;

        let err = store.add_widget("nope", clock()).await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::PreconditionViolation(Precondition::UnknownCategory(ref id)) if id == "nope"
        ));
        assert!(api.patches().is_empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_widget_id_is_rejected() {
        let api = Arc::new(StubApi::new(vec![
            Category::new("c1", "General", vec![clock()]),
            Category::new("c2", "Security", vec![]),
        ]));
        let store = loaded_store(&api).await;

        let err = store
            .add_widget("c2", Widget::with_id("w1", "Other", "x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::PreconditionViolation(Precondition::DuplicateWidget(_))
        ));
        assert!(api.patches().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_adds_of_one_id_to_two_categories() {
        let api = Arc::new(
            StubApi::new(vec![
                Category::new("c1", "General", vec![]),
                Category::new("c2", "Security", vec![]),
            ])
            .with_delay(Duration::from_millis(50)),
        );
        let store = loaded_store(&api).await;

        let (first, second) = tokio::join!(
            store.add_widget("c1", clock()),
            store.add_widget("c2", Widget::with_id("w1", "Other", "x")),
        );

        first.unwrap();
        assert!(matches!(
            second.unwrap_err(),
            SyncError::PreconditionViolation(Precondition::DuplicateWidget(ref id)) if id == "w1"
        ));
        assert_eq!(api.patches().len(), 1);
        assert_eq!(store.snapshot().all_widgets(), &[clock()]);
    }

    #[tokio::test]
    async fn test_failed_add_releases_widget_id() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;

        api.fail_with(500);
        assert!(store.add_widget("c1", clock()).await.is_err());

        api.recover();
        store.add_widget("c1", clock()).await.unwrap();
        assert_eq!(store.snapshot().all_widgets(), &[clock()]);
    }

    #[tokio::test]
    async fn test_failed_add_leaves_state_untouched() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;
        let before = store.snapshot();

        api.fail_with(500);
        let err = store.add_widget("c1", clock()).await.unwrap_err();

        assert!(matches!(err, SyncError::Server { status: 500, .. }));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_add_takes_server_version_of_category() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;

        api.rename_on_write("General (edited)");
        store.add_widget("c1", clock()).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.categories()[0].name, "General (edited)");
        assert_flattened(&snapshot);
    }

    #[tokio::test]
    async fn test_delete_removes_widget() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![clock(), alerts()])]));
        let store = loaded_store(&api).await;

        store.delete_widget("c1", "w1").await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.categories()[0].widgets, vec![alerts()]);
        assert_eq!(snapshot.all_widgets(), &[alerts()]);
    }

    #[tokio::test]
    async fn test_repeated_delete_is_idempotent() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![clock(), alerts()])]));
        let store = loaded_store(&api).await;

        store.delete_widget("c1", "w1").await.unwrap();
        let after_first = store.snapshot();
        store.delete_widget("c1", "w1").await.unwrap();

        assert_eq!(store.snapshot(), after_first);
        let patches = api.patches();
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[1].1, after_first.categories()[0].widgets);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state_untouched() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![clock()])]));
        let store = loaded_store(&api).await;
        let before = store.snapshot();

        api.fail_with(502);
        assert!(store.delete_widget("c1", "w1").await.is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_delete_in_unknown_category_issues_no_request() {
        let api = Arc::new(StubApi::new(vec![]));
        let store = loaded_store(&api).await;

        let err = store.delete_widget("c1", "w1").await.unwrap_err();

        assert!(err.is_precondition());
        assert!(api.patches().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_adds_to_one_category_both_survive() {
        let api = Arc::new(
            StubApi::new(vec![Category::new("c1", "General", vec![])])
                .with_delay(Duration::from_millis(50)),
        );
        let store = loaded_store(&api).await;

        let (first, second) = tokio::join!(
            store.add_widget("c1", clock()),
            store.add_widget("c1", alerts()),
        );
        first.unwrap();
        second.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.categories()[0].widgets, vec![clock(), alerts()]);
        assert_eq!(snapshot.all_widgets(), &[clock(), alerts()]);

        // The second PATCH was built on top of the first one's result
        let patches = api.patches();
        assert_eq!(patches[1].1, vec![clock(), alerts()]);
    }

    #[tokio::test]
    async fn test_invariant_holds_across_mixed_operations() {
        let api = Arc::new(StubApi::new(vec![
            Category::new("c1", "General", vec![clock()]),
            Category::new("c2", "Security", vec![]),
            Category::new("c3", "Cost", vec![alerts()]),
        ]));
        let store = loaded_store(&api).await;
        assert_flattened(&store.snapshot());

        store.add_widget("c2", Widget::with_id("w3", "Scan", "ok")).await.unwrap();
        assert_flattened(&store.snapshot());

        store.delete_widget("c1", "w1").await.unwrap();
        assert_flattened(&store.snapshot());

        api.fail_with(500);
        let _ = store.add_widget("c3", Widget::with_id("w4", "Spend", "$10")).await;
        assert_flattened(&store.snapshot());

        let snapshot = store.snapshot();
        let ids: Vec<&str> = snapshot.all_widgets().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["w3", "w2"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_changes_only() {
        let api = Arc::new(StubApi::new(vec![Category::new("c1", "General", vec![])]));
        let store = loaded_store(&api).await;
        let mut updates = store.subscribe();

        api.fail_with(500);
        let _ = store.add_widget("c1", clock()).await;
        assert!(!updates.has_changed().unwrap());

        api.recover();
        store.add_widget("c1", clock()).await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().all_widgets(), &[clock()]);
    }
}
