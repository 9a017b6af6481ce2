//! Containers running on monitored systems

use super::collections::CONTAINERS;
use super::system_filter;
use crate::client::BeszelClient;
use crate::collection::{ListQuery, DEFAULT_PER_PAGE};
use crate::error::BeszelResult;
use crate::models::Record;
use crate::transport::Transport;

impl<T: Transport> BeszelClient<T> {
    /// Containers of one system, or of every system when `system_id` is empty
    pub fn get_containers(&self, system_id: &str) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(CONTAINERS)
            .per_page(DEFAULT_PER_PAGE)
            .filter(system_filter(system_id));
        Ok(self.list_records(&query)?.items)
    }
}
