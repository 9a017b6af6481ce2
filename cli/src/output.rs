//! Rendering helpers for tables and JSON

use beszel::{Record, RecordExt};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::Value;

/// Output format
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable byte count, e.g. `1.5 KB`
pub fn format_bytes(value: f64) -> String {
    if value == 0.0 {
        return "0 B".to_string();
    }
    let mut value = value;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value.abs() < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} PB", value)
}

/// Percent-style number with fixed precision, `0` when absent
pub fn format_number(record: &Record, key: &str, precision: usize) -> String {
    format!("{:.*}", precision, record.f64_field(key).unwrap_or(0.0))
}

pub fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(_) | Value::Array(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

/// Scalar columns of a record, at most `limit`, in record order
pub fn scalar_columns(record: &Record, limit: usize) -> Vec<String> {
    record
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .map(|(k, _)| k.clone())
        .take(limit)
        .collect()
}

/// Status word shown for a system, `unknown` when absent
pub fn status_of(record: &Record) -> String {
    record.str_field("status").unwrap_or("unknown").to_string()
}

/// up is green, down is red, anything else (paused, pending) yellow
pub fn status_color(status: &str) -> Color {
    match status {
        "up" => Color::Green,
        "down" => Color::Red,
        _ => Color::Yellow,
    }
}

pub fn status_cell(record: &Record) -> Cell {
    let status = status_of(record);
    let color = status_color(&status);
    Cell::new(status).fg(color)
}
