//! Last-committed page of a remote collection plus local patch operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A record the list machinery can address and patch by id.
pub trait ListRecord: Clone + Serialize + DeserializeOwned {
    fn record_id(&self) -> i32;

    /// Whether the record counts as active for page-scoped aggregates.
    fn is_active(&self) -> bool {
        true
    }
}

/// One page of a remote collection together with its pagination metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Holds the latest committed [`PageResult`] for one view instance.
///
/// Results are replaced wholesale on commit, never merged. Local removals
/// and patches are optimistic: they may drift from server truth and are
/// corrected by the next full fetch.
#[derive(Debug)]
pub struct ResultCache<T> {
    current: Option<PageResult<T>>,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: ListRecord> ResultCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic replace of the whole page.
    pub fn commit(&mut self, result: PageResult<T>) {
        self.current = Some(result);
    }

    pub fn current(&self) -> Option<&PageResult<T>> {
        self.current.as_ref()
    }

    pub fn items(&self) -> &[T] {
        self.current.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, id: i32) -> bool {
        self.items().iter().any(|item| item.record_id() == id)
    }

    pub fn total_count(&self) -> usize {
        self.current.as_ref().map(|p| p.total_count).unwrap_or(0)
    }

    pub fn total_pages(&self) -> usize {
        self.current.as_ref().map(|p| p.total_pages.max(1)).unwrap_or(1)
    }

    /// Removes the record after a successful delete and decrements the total
    /// count. `total_pages` is left as-is; the drift is acceptable until the
    /// next fetch.
    pub fn apply_local_removal(&mut self, id: i32) -> bool {
        let Some(page) = self.current.as_mut() else {
            return false;
        };
        let before = page.items.len();
        page.items.retain(|item| item.record_id() != id);
        if page.items.len() < before {
            page.total_count = page.total_count.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Merges a partial JSON object into the matching record after a
    /// successful update. Returns false when the id is not on this page or
    /// the merged value no longer deserializes into the record type.
    pub fn apply_local_patch(&mut self, id: i32, partial: &Value) -> bool {
        let Some(page) = self.current.as_mut() else {
            return false;
        };
        let Some(slot) = page.items.iter_mut().find(|item| item.record_id() == id) else {
            return false;
        };
        let Ok(mut merged) = serde_json::to_value(&*slot) else {
            return false;
        };
        match (merged.as_object_mut(), partial.as_object()) {
            (Some(target), Some(fields)) => {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            _ => return false,
        }
        match serde_json::from_value::<T>(merged) {
            Ok(updated) => {
                *slot = updated;
                true
            }
            Err(_) => false,
        }
    }

    /// Number of active records on the current page only. This is not a
    /// collection-wide total; do not present it as one.
    pub fn active_on_page(&self) -> usize {
        self.items().iter().filter(|item| item.is_active()).count()
    }
}
