//! System and container stats history

use super::collections::{CONTAINER_STATS, SYSTEM_STATS};
use super::{system_filter, system_stats_filter, NEWEST_FIRST};
use crate::client::BeszelClient;
use crate::collection::ListQuery;
use crate::error::BeszelResult;
use crate::models::Record;
use crate::transport::Transport;

pub const DEFAULT_STATS_PER_PAGE: u32 = 30;

impl<T: Transport> BeszelClient<T> {
    /// Newest-first stats of one system for a record type (`1m`, `10m`,
    /// `20m`, `120m`, `480m`). The record type is not checked locally.
    pub fn get_system_stats(
        &self,
        system_id: &str,
        record_type: &str,
        per_page: u32,
    ) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(SYSTEM_STATS)
            .per_page(per_page)
            .sort(NEWEST_FIRST)
            .filter(system_stats_filter(system_id, record_type));
        Ok(self.list_records(&query)?.items)
    }

    /// Newest-first container stats of one system
    pub fn get_container_stats(&self, system_id: &str, per_page: u32) -> BeszelResult<Vec<Record>> {
        let query = ListQuery::new(CONTAINER_STATS)
            .per_page(per_page)
            .sort(NEWEST_FIRST)
            .filter(system_filter(system_id));
        Ok(self.list_records(&query)?.items)
    }
}
