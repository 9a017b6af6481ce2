//! Alert rules and alert history

use serde_json::Value;

use super::collections::{ALERTS, ALERTS_HISTORY};
use super::{system_filter, NEWEST_FIRST};
use crate::client::BeszelClient;
use crate::collection::{ListQuery, DEFAULT_PER_PAGE};
use crate::error::BeszelResult;
use crate::models::Record;
use crate::transport::Transport;

/// Relation expanded on alert records so the system name is available
pub const ALERT_EXPAND: &str = "system";

pub const DEFAULT_HISTORY_PER_PAGE: u32 = 50;

impl<T: Transport> BeszelClient<T> {
    /// Alerts of one system, or all alerts when `system_id` is empty.
    /// The owning system is expanded under `expand.system`.
    pub fn get_alerts(&self, system_id: &str) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(ALERTS)
            .per_page(DEFAULT_PER_PAGE)
            .filter(system_filter(system_id))
            .expand(ALERT_EXPAND);
        Ok(self.list_records(&query)?.items)
    }

    pub fn get_alert(&self, alert_id: &str) -> BeszelResult<Record> {
        self.get_record(ALERTS, alert_id, ALERT_EXPAND)
    }

    pub fn create_alert(&self, data: &Value) -> BeszelResult<Record> {
        self.create_record(ALERTS, data)
    }

    pub fn update_alert(&self, alert_id: &str, data: &Value) -> BeszelResult<Record> {
        self.update_record(ALERTS, alert_id, data)
    }

    pub fn delete_alert(&self, alert_id: &str) -> BeszelResult<()> {
        self.delete_record(ALERTS, alert_id)
    }

    /// Newest-first alert history
    pub fn get_alert_history(&self, per_page: u32) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(ALERTS_HISTORY)
            .per_page(per_page)
            .sort(NEWEST_FIRST);
        Ok(self.list_records(&query)?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordExt;
    use crate::testing::{client_with, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_alerts_expand_system_without_filter() {
        let (transport, handle) = MockTransport::new();
        let transport = transport.respond(
            200,
            json!({"items": [{"id": "a1", "system": "s1", "name": "CPU", "value": 80, "triggered": false,
                              "expand": {"system": {"id": "s1", "name": "box1"}}}]}),
        );
        let client = client_with(transport, Some("tok"));

        let alerts = client.get_alerts("").unwrap();
        let system = alerts[0]
            .object_field("expand")
            .and_then(|e| e.object_field("system"))
            .and_then(|s| s.str_field("name"));
        assert_eq!(system, Some("box1"));

        let sent = handle.last();
        assert_eq!(sent.url, "https://hub.example.com/api/collections/alerts/records");
        assert_eq!(sent.query_param("expand"), Some("system"));
        assert_eq!(sent.query_param("filter"), None);
        assert_eq!(sent.query_param("sort"), None);
    }

    #[test]
    fn test_alerts_for_system() {
        let (transport, handle) = MockTransport::new();
        let client = client_with(transport, None);

        client.get_alerts("sys1").unwrap();
        assert_eq!(handle.last().query_param("filter"), Some("system=\"sys1\""));
    }

    #[test]
    fn test_alert_crud() {
        let (transport, handle) = MockTransport::new();
        let transport = transport
            .respond(200, json!({"id": "a1"}))
            .respond(200, json!({"id": "a2", "name": "Memory"}))
            .respond(200, json!({"id": "a2", "value": 95}))
            .respond_raw(204, "");
        let client = client_with(transport, Some("tok"));

        client.get_alert("a1").unwrap();
        client.create_alert(&json!({"system": "s1", "name": "Memory", "value": 90})).unwrap();
        client.update_alert("a2", &json!({"value": 95})).unwrap();
        client.delete_alert("a2").unwrap();

        let sent = handle.requests();
        assert_eq!(sent[0].query_param("expand"), Some("system"));
        assert_eq!(sent[1].method, Method::POST);
        assert_eq!(sent[1].url, "https://hub.example.com/api/collections/alerts/records");
        assert_eq!(sent[2].method, Method::PATCH);
        assert_eq!(sent[3].method, Method::DELETE);
        assert_eq!(sent[3].url, "https://hub.example.com/api/collections/alerts/records/a2");
    }

    #[test]
    fn test_alert_history_sorted_newest_first() {
        let (transport, handle) = MockTransport::new();
        let client = client_with(transport, None);

        client.get_alert_history(DEFAULT_HISTORY_PER_PAGE).unwrap();
        let sent = handle.last();
        assert_eq!(sent.url, "https://hub.example.com/api/collections/alerts_history/records");
        assert_eq!(sent.query_param("sort"), Some("-created"));
        assert_eq!(sent.query_param("perPage"), Some("50"));
        assert_eq!(sent.query_param("filter"), None);
    }
}
