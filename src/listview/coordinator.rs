//! Turns query-state changes into at most one committed fetch.
//!
//! Every fetch is tagged with a sequence number taken when the request is
//! issued. A response is committed only if its tag is still the newest one;
//! responses outrun by a later request are discarded without touching the
//! cache. Network failures keep the previous page visible and surface a
//! single error notice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::json;
use tokio::sync::Mutex;

use crate::listview::cache::{PageResult, ResultCache};
use crate::listview::catalog::SortKey;
use crate::listview::query::{QueryState, SortMode};
use crate::listview::source::{DataSource, SourceError};
use crate::listview::{ListViewError, Notice};

/// Delay between the last keystroke and the search fetch.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the session provider currently knows. Fetches are held back while
/// `Loading` and refused entirely when the session cannot cover the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionGate {
    Loading,
    Authenticated(Vec<String>),
    Unauthenticated,
}

/// Terminal state of one fetch attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Latest response, committed to the cache.
    Committed,
    /// A newer request was issued before this one resolved; nothing changed.
    Discarded,
    /// The latest request failed; previous cache kept, one notice pushed.
    Errored,
    /// Not issued at all (session still loading, or client-side sort).
    Skipped,
}

struct Inner<T> {
    state: QueryState,
    cache: ResultCache<T>,
    gate: SessionGate,
    loading: bool,
    notices: Vec<Notice>,
}

/// One view instance's controller. Owns the query state and result cache;
/// nothing is shared across views.
pub struct Controller<S: DataSource> {
    source: S,
    inner: Mutex<Inner<S::Item>>,
    latest_seq: AtomicU64,
    search_gen: AtomicU64,
    debounce: Duration,
    allowed_roles: Vec<String>,
}

impl<S: DataSource> Controller<S> {
    pub fn new(source: S, state: QueryState) -> Self {
        Self {
            source,
            inner: Mutex::new(Inner {
                state,
                cache: ResultCache::new(),
                gate: SessionGate::Authenticated(Vec::new()),
                loading: false,
                notices: Vec::new(),
            }),
            latest_seq: AtomicU64::new(0),
            search_gen: AtomicU64::new(0),
            debounce: SEARCH_DEBOUNCE,
            allowed_roles: Vec::new(),
        }
    }

    /// Requires the session to carry one of `roles`. Until the session
    /// provider reports in, the gate sits at `Loading` and fetches no-op.
    pub fn restricted_to(mut self, roles: Vec<String>) -> Self {
        self.allowed_roles = roles;
        self.inner.get_mut().gate = SessionGate::Loading;
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub async fn set_session_gate(&self, gate: SessionGate) {
        self.inner.lock().await.gate = gate;
    }

    /// Issues a fetch for the current query state and commits the response
    /// if it is still the newest request by the time it resolves.
    pub async fn refresh(&self) -> Result<FetchOutcome, ListViewError> {
        // The tag must be claimed under the same lock as the snapshot, or two
        // concurrent refreshes could pair the older snapshot with the newer tag.
        let (snapshot, seq) = {
            let mut inner = self.inner.lock().await;
            match Self::gate_allows(&inner.gate, &self.allowed_roles) {
                GateDecision::Wait => return Ok(FetchOutcome::Skipped),
                GateDecision::Deny => return Err(ListViewError::Unauthorized),
                GateDecision::Allow => {}
            }
            inner.loading = true;
            let seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
            (inner.state.snapshot(), seq)
        };

        let result = self.source.fetch(&snapshot).await;

        let mut inner = self.inner.lock().await;
        if self.latest_seq.load(Ordering::SeqCst) != seq {
            // A newer request owns the loading flag now.
            return Ok(FetchOutcome::Discarded);
        }
        inner.loading = false;
        match result {
            Ok(page) => {
                inner.state.note_total_pages(page.total_pages);
                inner.cache.commit(page);
                Ok(FetchOutcome::Committed)
            }
            Err(err) => {
                inner
                    .notices
                    .push(Notice::error(format!("Failed to load the list: {err}")));
                Ok(FetchOutcome::Errored)
            }
        }
    }

    /// Debounced free-text search: waits out the typing pause, then fetches
    /// unless another keystroke superseded this one.
    pub async fn search(&self, term: &str) -> Result<FetchOutcome, ListViewError> {
        {
            let mut inner = self.inner.lock().await;
            inner.state.set_search(term);
        }
        let generation = self.search_gen.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if self.search_gen.load(Ordering::SeqCst) != generation {
            return Ok(FetchOutcome::Discarded);
        }
        self.refresh().await
    }

    /// Filter changes fetch immediately; no debounce.
    pub async fn apply_filter(&self, name: &str, value: &str) -> Result<FetchOutcome, ListViewError> {
        {
            let mut inner = self.inner.lock().await;
            inner.state.set_filter(name, value);
        }
        self.refresh().await
    }

    pub async fn apply_sort(
        &self,
        sort: Option<SortKey>,
        mode: SortMode,
    ) -> Result<FetchOutcome, ListViewError> {
        {
            let mut inner = self.inner.lock().await;
            inner.state.set_sort(sort, mode);
        }
        if mode == SortMode::ClientSide {
            // The page already holds everything this sort needs.
            return Ok(FetchOutcome::Skipped);
        }
        self.refresh().await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<FetchOutcome, ListViewError> {
        {
            let mut inner = self.inner.lock().await;
            inner.state.set_page(page);
        }
        self.refresh().await
    }

    /// Confirm-then-delete flow: the confirmation hook decides, the delete
    /// call runs, and on success the record is removed locally with no
    /// refetch. Returns whether the record ended up removed.
    pub async fn confirm_then_delete<F>(&self, id: i32, display_name: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(display_name) {
            return false;
        }
        {
            // Already gone from the renderable list: nothing to delete.
            let inner = self.inner.lock().await;
            if !inner.cache.contains(id) {
                return false;
            }
        }
        match self.source.delete(id).await {
            Ok(()) => {
                let mut inner = self.inner.lock().await;
                let removed = inner.cache.apply_local_removal(id);
                inner
                    .notices
                    .push(Notice::success(format!("{display_name} deleted.")));
                removed
            }
            Err(err) => {
                let mut inner = self.inner.lock().await;
                inner.notices.push(Notice::error(delete_failure_message(
                    display_name,
                    &err,
                )));
                false
            }
        }
    }

    /// Flips the record's active flag through a partial update and patches
    /// the cached copy on success.
    pub async fn toggle_status(&self, id: i32, current: bool) -> bool {
        let partial = json!({ "active": !current });
        match self.source.patch(id, partial.clone()).await {
            Ok(updated) => {
                let mut inner = self.inner.lock().await;
                let patch = updated
                    .as_ref()
                    .and_then(|record| serde_json::to_value(record).ok())
                    .unwrap_or(partial);
                inner.cache.apply_local_patch(id, &patch)
            }
            Err(err) => {
                let mut inner = self.inner.lock().await;
                inner
                    .notices
                    .push(Notice::error(format!("Failed to update the record: {err}")));
                false
            }
        }
    }

    pub async fn loading(&self) -> bool {
        self.inner.lock().await.loading
    }

    pub async fn items(&self) -> Vec<S::Item> {
        self.inner.lock().await.cache.items().to_vec()
    }

    pub async fn page_result(&self) -> Option<PageResult<S::Item>> {
        self.inner.lock().await.cache.current().cloned()
    }

    pub async fn total_count(&self) -> usize {
        self.inner.lock().await.cache.total_count()
    }

    pub async fn current_page(&self) -> usize {
        self.inner.lock().await.state.page()
    }

    /// Active records on the current page only; never a collection total.
    pub async fn active_on_page(&self) -> usize {
        self.inner.lock().await.cache.active_on_page()
    }

    /// Drains pending notices for display.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.inner.lock().await.notices)
    }

    fn gate_allows(gate: &SessionGate, allowed_roles: &[String]) -> GateDecision {
        match gate {
            SessionGate::Loading => GateDecision::Wait,
            SessionGate::Unauthenticated => GateDecision::Deny,
            SessionGate::Authenticated(roles) => {
                if allowed_roles.is_empty()
                    || allowed_roles.iter().any(|role| roles.contains(role))
                {
                    GateDecision::Allow
                } else {
                    GateDecision::Deny
                }
            }
        }
    }
}

enum GateDecision {
    Allow,
    Wait,
    Deny,
}

fn delete_failure_message(display_name: &str, err: &SourceError) -> String {
    match err {
        SourceError::Rejected(message) => format!("Failed to delete {display_name}: {message}"),
        _ => format!("Failed to delete {display_name}: {err}"),
    }
}
