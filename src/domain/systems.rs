//! Monitored systems

use serde_json::Value;

use super::collections::SYSTEMS;
use crate::client::BeszelClient;
use crate::collection::{ListQuery, DEFAULT_PER_PAGE};
use crate::error::BeszelResult;
use crate::models::Record;
use crate::transport::Transport;

impl<T: Transport> BeszelClient<T> {
    /// List systems, optionally narrowed by a hub filter expression
    pub fn get_systems(&self, filter: &str) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(SYSTEMS)
            .per_page(DEFAULT_PER_PAGE)
            .filter(filter);
        Ok(self.list_records(&query)?.items)
    }

    pub fn get_system(&self, system_id: &str) -> BeszelResult<Record> {
        self.get_record(SYSTEMS, system_id, "")
    }

    pub fn update_system(&self, system_id: &str, data: &Value) -> BeszelResult<Record> {
        self.update_record(SYSTEMS, system_id, data)
    }

    pub fn delete_system(&self, system_id: &str) -> BeszelResult<()> {
        self.delete_record(SYSTEMS, system_id)
    }
}
