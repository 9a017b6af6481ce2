//! Generic collection accessor
//!
//! Collection-scoped REST calls against `/api/collections/{collection}/records`.
//! Filter, sort and expand expressions are opaque hub query-language strings
//! and are forwarded verbatim.

use reqwest::Method;
use serde_json::Value;

use crate::client::BeszelClient;
use crate::error::BeszelResult;
use crate::models::{CollectionResult, Record};
use crate::transport::Transport;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 200;

/// Parameters of one `list` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub collection: String,
    pub page: u32,
    pub per_page: u32,
    pub sort: String,
    pub filter: String,
    pub expand: String,
}

impl ListQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            sort: String::new(),
            filter: String::new(),
            expand: String::new(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = expand.into();
        self
    }

    /// Query string pairs. `page` and `perPage` are always present;
    /// `sort`, `filter` and `expand` only when non-empty.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
        ];
        push_non_empty(&mut params, "sort", &self.sort);
        push_non_empty(&mut params, "filter", &self.filter);
        push_non_empty(&mut params, "expand", &self.expand);
        params
    }
}

fn push_non_empty(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !value.is_empty() {
        params.push((key.to_string(), value.to_string()));
    }
}

fn records_path(collection: &str) -> String {
    format!("/api/collections/{}/records", collection)
}

fn record_path(collection: &str, id: &str) -> String {
    format!("/api/collections/{}/records/{}", collection, id)
}

fn into_record(value: Value) -> BeszelResult<Record> {
    Ok(serde_json::from_value(value)?)
}

impl<T: Transport> BeszelClient<T> {
    /// List one page of a collection
    pub fn list_records(&self, query: &ListQuery) -> BeszelResult<CollectionResult> {
        let value = self.request(
            Method::GET,
            &records_path(&query.collection),
            &query.to_params(),
            None,
        )?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch one record, optionally expanding relations
    pub fn get_record(&self, collection: &str, id: &str, expand: &str) -> BeszelResult<Record> {
        let mut params = Vec::new();
        push_non_empty(&mut params, "expand", expand);
        let value = self.request(Method::GET, &record_path(collection, id), &params, None)?;
        into_record(value)
    }

    /// Create a record from a JSON body
    pub fn create_record(&self, collection: &str, data: &Value) -> BeszelResult<Record> {
        let value = self.request(Method::POST, &records_path(collection), &[], Some(data))?;
        into_record(value)
    }

    /// Patch a record with a JSON body
    pub fn update_record(&self, collection: &str, id: &str, data: &Value) -> BeszelResult<Record> {
        let value = self.request(Method::PATCH, &record_path(collection, id), &[], Some(data))?;
        into_record(value)
    }

    pub fn delete_record(&self, collection: &str, id: &str) -> BeszelResult<()> {
        self.request_empty(Method::DELETE, &record_path(collection, id))
    }
}
