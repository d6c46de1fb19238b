//! Data Source boundary: the trait the controller fetches through, plus the
//! REST implementation and the envelope normalization it relies on.
//!
//! The backing API grew two response conventions over time: some endpoints
//! nest the page under `data`, others under the collection name, and a few
//! return it flat. [`parse_page`] is the single place that understands all
//! of them; nothing past this module branches on envelope shape.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::listview::cache::{ListRecord, PageResult};
use crate::listview::query::QuerySnapshot;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure, timeout, or a non-JSON reply.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with `success: false`; the payload message is
    /// carried through for user-facing notices.
    #[error("{0}")]
    Rejected(String),

    #[error("malformed response envelope")]
    Envelope,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

/// Remote collection the controller reads and mutates.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Item: ListRecord + Send;

    async fn fetch(&self, query: &QuerySnapshot) -> Result<PageResult<Self::Item>, SourceError>;

    async fn delete(&self, id: i32) -> Result<(), SourceError>;

    /// Partial update. Returns the updated record when the server echoes it
    /// back in `data`.
    async fn patch(&self, id: i32, partial: Value) -> Result<Option<Self::Item>, SourceError>;
}

/// Normalizes any of the observed list envelopes into a [`PageResult`].
pub fn parse_page<T: DeserializeOwned>(body: &Value) -> Result<PageResult<T>, SourceError> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(SourceError::Rejected(rejection_message(body)));
    }

    let container = find_items_container(body).ok_or(SourceError::Envelope)?;
    let raw_items = container
        .get("items")
        .and_then(Value::as_array)
        .ok_or(SourceError::Envelope)?;

    let items = raw_items
        .iter()
        .cloned()
        .map(serde_json::from_value)
        .collect::<Result<Vec<T>, _>>()
        .map_err(|_| SourceError::Envelope)?;

    let pagination = container.get("pagination");
    let page = read_usize(pagination, &["page"]).unwrap_or(1);
    let total_pages = read_usize(pagination, &["totalPages", "total_pages"]).unwrap_or(1);
    let total_count =
        read_usize(pagination, &["total", "totalCount", "total_count"]).unwrap_or(items.len());

    Ok(PageResult {
        items,
        page,
        total_pages,
        total_count,
    })
}

fn rejection_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or("request rejected by the server")
        .to_string()
}

fn find_items_container(body: &Value) -> Option<&Value> {
    if body.get("items").is_some() {
        return Some(body);
    }
    if let Some(data) = body.get("data")
        && data.get("items").is_some()
    {
        return Some(data);
    }
    // Collection-named envelope: the page sits under some other object key.
    body.as_object()?
        .values()
        .find(|value| value.is_object() && value.get("items").is_some())
}

fn read_usize(pagination: Option<&Value>, names: &[&str]) -> Option<usize> {
    let pagination = pagination?;
    names
        .iter()
        .find_map(|name| pagination.get(name))
        .and_then(Value::as_u64)
        .map(|n| n as usize)
}

/// [`DataSource`] over the REST API described in the service contract.
pub struct RestDataSource<T> {
    http: reqwest::Client,
    base_url: String,
    collection: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RestDataSource<T> {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, id)
    }
}

#[async_trait]
impl<T> DataSource for RestDataSource<T>
where
    T: ListRecord + Send + Sync,
{
    type Item = T;

    async fn fetch(&self, query: &QuerySnapshot) -> Result<PageResult<T>, SourceError> {
        let mut request = self.http.get(self.collection_url()).query(&[
            ("page", query.page.to_string()),
            ("limit", query.page_size.to_string()),
        ]);
        if !query.search.is_empty() {
            request = request.query(&[("search", query.search.as_str())]);
        }
        if let Some(sort) = query.sort {
            request = request.query(&[("sort", sort.as_str())]);
        }
        for (name, value) in &query.filters {
            request = request.query(&[(name.as_str(), value.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|_| SourceError::Transport(format!("unexpected reply ({status})")))?;
        parse_page(&body)
    }

    async fn delete(&self, id: i32) -> Result<(), SourceError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        let status = response.status();
        let body = response.json::<Value>().await.ok();
        if let Some(body) = &body
            && body.get("success").and_then(Value::as_bool) == Some(false)
        {
            return Err(SourceError::Rejected(rejection_message(body)));
        }
        if !status.is_success() {
            return Err(SourceError::Transport(format!("unexpected reply ({status})")));
        }
        Ok(())
    }

    async fn patch(&self, id: i32, partial: Value) -> Result<Option<T>, SourceError> {
        let response = self
            .http
            .patch(self.item_url(id))
            .json(&partial)
            .send()
            .await?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|_| SourceError::Transport(format!("unexpected reply ({status})")))?;
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(SourceError::Rejected(rejection_message(&body)));
        }
        if !status.is_success() {
            return Err(SourceError::Transport(format!("unexpected reply ({status})")));
        }
        Ok(body
            .get("data")
            .cloned()
            .and_then(|data| serde_json::from_value(data).ok()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: i32,
        title: String,
    }

    impl ListRecord for Row {
        fn record_id(&self) -> i32 {
            self.id
        }
    }

    #[test]
    fn parses_nested_data_envelope() {
        let body = json!({
            "success": true,
            "data": {
                "items": [{ "id": 1, "title": "a" }],
                "pagination": { "page": 2, "totalPages": 7, "total": 70 }
            }
        });
        let page: PageResult<Row> = parse_page(&body).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.total_count, 70);
        assert_eq!(page.items, vec![Row { id: 1, title: "a".into() }]);
    }

    #[test]
    fn parses_collection_named_envelope() {
        let body = json!({
            "success": true,
            "jobs": {
                "items": [{ "id": 3, "title": "c" }],
                "pagination": { "page": 1, "total_pages": 1, "total_count": 1 }
            }
        });
        let page: PageResult<Row> = parse_page(&body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn parses_flat_envelope_without_pagination() {
        let body = json!({
            "items": [{ "id": 1, "title": "a" }, { "id": 2, "title": "b" }]
        });
        let page: PageResult<Row> = parse_page(&body).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn error_envelope_carries_server_message() {
        let body = json!({ "success": false, "message": "database unavailable" });
        let err = parse_page::<Row>(&body).unwrap_err();
        match err {
            SourceError::Rejected(message) => assert_eq!(message, "database unavailable"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_items_is_a_malformed_envelope() {
        let body = json!({ "success": true, "data": { "count": 3 } });
        assert!(matches!(
            parse_page::<Row>(&body),
            Err(SourceError::Envelope)
        ));
    }
}
