use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use arsa_nexus::listview::query::QuerySnapshot;
use arsa_nexus::listview::{
    Controller, DataSource, FetchOutcome, ListRecord, ListViewError, NoticeLevel, PageResult,
    QueryState, SessionGate, SourceError,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Row {
    id: i32,
    name: String,
    active: bool,
}

impl ListRecord for Row {
    fn record_id(&self) -> i32 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

fn page(ids: &[i32], total_pages: usize, total_count: usize) -> PageResult<Row> {
    PageResult {
        items: ids
            .iter()
            .map(|id| Row {
                id: *id,
                name: format!("user-{id}"),
                active: true,
            })
            .collect(),
        page: 1,
        total_pages,
        total_count,
    }
}

/// Data source that replays a fixed script: each fetch takes the next
/// `(delay, result)` entry, sleeping through the delay before answering.
/// Counters are shared so tests can keep a handle after the source moves
/// into the controller.
struct ScriptedSource {
    script: Vec<(Duration, Result<PageResult<Row>, String>)>,
    fetch_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    seen_queries: Arc<Mutex<Vec<QuerySnapshot>>>,
}

impl ScriptedSource {
    fn new(script: Vec<(Duration, Result<PageResult<Row>, String>)>) -> Self {
        Self {
            script,
            fetch_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
            seen_queries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    type Item = Row;

    async fn fetch(&self, query: &QuerySnapshot) -> Result<PageResult<Row>, SourceError> {
        let index = self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_queries.lock().unwrap().push(query.clone());
        let (delay, result) = self
            .script
            .get(index)
            .cloned()
            .expect("fetch beyond the scripted calls");
        tokio::time::sleep(delay).await;
        result.map_err(SourceError::Transport)
    }

    async fn delete(&self, _id: i32) -> Result<(), SourceError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn patch(&self, _id: i32, _partial: Value) -> Result<Option<Row>, SourceError> {
        Ok(None)
    }
}

fn controller(
    script: Vec<(Duration, Result<PageResult<Row>, String>)>,
) -> Controller<ScriptedSource> {
    Controller::new(ScriptedSource::new(script), QueryState::new(10))
}

#[tokio::test(start_paused = true)]
async fn stale_response_is_discarded() {
    // The first request is slow; a filter change issues a second, faster one.
    let ctrl = controller(vec![
        (Duration::from_millis(100), Ok(page(&[1, 2, 3], 5, 42))),
        (Duration::from_millis(10), Ok(page(&[7, 8], 1, 2))),
    ]);

    let (first, second) = tokio::join!(ctrl.refresh(), ctrl.apply_filter("category", "Web"));

    assert_eq!(first.unwrap(), FetchOutcome::Discarded);
    assert_eq!(second.unwrap(), FetchOutcome::Committed);

    // The cache holds the newer page; the slow reply never landed.
    let ids: Vec<i32> = ctrl.items().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![7, 8]);
    assert_eq!(ctrl.total_count().await, 2);
    assert_eq!(ctrl.current_page().await, 1);
    assert!(!ctrl.loading().await);
}

#[tokio::test(start_paused = true)]
async fn committed_page_matches_the_query_that_won() {
    let source = ScriptedSource::new(vec![
        (Duration::from_millis(100), Ok(page(&[1, 2, 3], 5, 42))),
        (Duration::from_millis(10), Ok(page(&[7, 8], 1, 2))),
    ]);
    let seen_queries = source.seen_queries.clone();
    let ctrl = Controller::new(source, QueryState::new(10));

    let (slow, fast) = tokio::join!(ctrl.refresh(), ctrl.apply_filter("category", "Web"));

    assert_eq!(slow.unwrap(), FetchOutcome::Discarded);
    assert_eq!(fast.unwrap(), FetchOutcome::Committed);

    // Snapshot and tag are claimed in one critical section, so the later tag
    // always carries the later query state: here the filtered one.
    {
        let queries = seen_queries.lock().unwrap();
        assert_eq!(queries[0].filters.get("category"), None);
        assert_eq!(
            queries[1].filters.get("category").map(String::as_str),
            Some("Web")
        );
    }

    let ids: Vec<i32> = ctrl.items().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_collapse_into_one_fetch() {
    let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(page(&[1], 1, 1)))]);
    let fetch_calls = source.fetch_calls.clone();
    let seen_queries = source.seen_queries.clone();
    let ctrl = Controller::new(source, QueryState::new(10));

    let (first, second) = tokio::join!(ctrl.search("ru"), ctrl.search("rust"));

    assert_eq!(first.unwrap(), FetchOutcome::Discarded);
    assert_eq!(second.unwrap(), FetchOutcome::Committed);

    // Only the final term ever reached the wire.
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(seen_queries.lock().unwrap()[0].search, "rust");
}

#[tokio::test(start_paused = true)]
async fn delete_patches_the_cache_without_a_refetch() {
    let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(page(&[1, 2, 3], 2, 12)))]);
    let fetch_calls = source.fetch_calls.clone();
    let ctrl = Controller::new(source, QueryState::new(10));
    ctrl.refresh().await.unwrap();

    let removed = ctrl.confirm_then_delete(2, "User 2", |_| true).await;

    assert!(removed);
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
    let ids: Vec<i32> = ctrl.items().await.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ctrl.total_count().await, 11);

    let notices = ctrl.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Success);
}

#[tokio::test(start_paused = true)]
async fn declined_confirmation_deletes_nothing() {
    let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(page(&[1, 2], 1, 2)))]);
    let delete_calls = source.delete_calls.clone();
    let ctrl = Controller::new(source, QueryState::new(10));
    ctrl.refresh().await.unwrap();

    let removed = ctrl.confirm_then_delete(2, "User 2", |_| false).await;

    assert!(!removed);
    assert_eq!(delete_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ctrl.items().await.len(), 2);
    assert!(ctrl.take_notices().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_the_previous_page() {
    let ctrl = controller(vec![
        (Duration::ZERO, Ok(page(&[1, 2], 1, 2))),
        (Duration::ZERO, Err("connection reset".to_string())),
    ]);

    assert_eq!(ctrl.refresh().await.unwrap(), FetchOutcome::Committed);
    assert_eq!(ctrl.refresh().await.unwrap(), FetchOutcome::Errored);

    // The stale-but-valid page is still renderable.
    assert_eq!(ctrl.items().await.len(), 2);
    assert!(!ctrl.loading().await);

    let notices = ctrl.take_notices().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
}

#[tokio::test(start_paused = true)]
async fn loading_session_holds_fetches_back() {
    let source = ScriptedSource::new(vec![]);
    let fetch_calls = source.fetch_calls.clone();
    let ctrl =
        Controller::new(source, QueryState::new(10)).restricted_to(vec!["nexus_admin".to_string()]);

    assert_eq!(ctrl.refresh().await.unwrap(), FetchOutcome::Skipped);
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn unauthenticated_session_is_refused() {
    let source = ScriptedSource::new(vec![]);
    let ctrl =
        Controller::new(source, QueryState::new(10)).restricted_to(vec!["nexus_admin".to_string()]);

    ctrl.set_session_gate(SessionGate::Unauthenticated).await;
    assert_eq!(
        ctrl.refresh().await.unwrap_err(),
        ListViewError::Unauthorized
    );

    // Wrong role is refused the same way.
    ctrl.set_session_gate(SessionGate::Authenticated(vec!["nexus".to_string()]))
        .await;
    assert_eq!(
        ctrl.refresh().await.unwrap_err(),
        ListViewError::Unauthorized
    );
}

#[tokio::test(start_paused = true)]
async fn matching_role_unlocks_fetches() {
    let source = ScriptedSource::new(vec![(Duration::ZERO, Ok(page(&[1], 1, 1)))]);
    let ctrl =
        Controller::new(source, QueryState::new(10)).restricted_to(vec!["nexus_admin".to_string()]);

    ctrl.set_session_gate(SessionGate::Authenticated(vec![
        "nexus".to_string(),
        "nexus_admin".to_string(),
    ]))
    .await;

    assert_eq!(ctrl.refresh().await.unwrap(), FetchOutcome::Committed);
    assert_eq!(ctrl.items().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn toggle_patches_the_cached_record() {
    let ctrl = controller(vec![(Duration::ZERO, Ok(page(&[1, 2], 1, 2)))]);
    ctrl.refresh().await.unwrap();
    assert_eq!(ctrl.active_on_page().await, 2);

    assert!(ctrl.toggle_status(1, true).await);

    assert_eq!(ctrl.active_on_page().await, 1);
    let items = ctrl.items().await;
    let toggled = items.iter().find(|r| r.id == 1).unwrap();
    assert!(!toggled.active);
}
