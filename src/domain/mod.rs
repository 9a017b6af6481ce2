//! Domain accessors
//!
//! Thin typed wrappers over the collection accessor. Each one fixes the
//! collection name and, where needed, a derived filter and sort. When an
//! optional system id is empty the filter is omitted entirely.

pub mod alerts;
pub mod containers;
pub mod stats;
pub mod systems;

/// Collection names owned by the hub
pub mod collections {
    pub const SYSTEMS: &str = "systems";
    pub const SYSTEM_STATS: &str = "system_stats";
    pub const CONTAINER_STATS: &str = "container_stats";
    pub const CONTAINERS: &str = "containers";
    pub const ALERTS: &str = "alerts";
    pub const ALERTS_HISTORY: &str = "alerts_history";
}

/// Newest records first
pub const NEWEST_FIRST: &str = "-created";

/// `system="<id>"`, or no filter at all for an empty id
pub fn system_filter(system_id: &str) -> String {
    if system_id.is_empty() {
        String::new()
    } else {
        format!("system=\"{}\"", system_id)
    }
}

/// `system="<id>" && type="<record_type>"`
pub fn system_stats_filter(system_id: &str, record_type: &str) -> String {
    format!("system=\"{}\" && type=\"{}\"", system_id, record_type)
}
