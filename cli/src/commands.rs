//! Subcommand handlers
//!
//! Every handler that talks to the hub opens its own client and lets it
//! drop at the end of the function, so the connection is released on every
//! return path.

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use beszel::{
    BeszelClient, ClientConfig, ConfigStore, ListQuery, Record, RecordExt, RecordType,
};
use comfy_table::Cell;
use serde_json::{Map, Value};
use tracing::debug;

use crate::output::{
    format_bytes, format_number, format_table_value, new_table, print_json, scalar_columns,
    status_cell, status_of, OutputFormat,
};

type CliResult = Result<(), Box<dyn Error>>;

/// Columns shown by `records` when auto-detecting
const MAX_RECORD_COLUMNS: usize = 8;

pub struct Context {
    url: Option<String>,
    token: Option<String>,
    store: ConfigStore,
    format: OutputFormat,
}

impl Context {
    pub fn new(
        url: Option<String>,
        token: Option<String>,
        config: Option<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        let store = match config {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::default_location(),
        };
        Self { url, token, store, format }
    }

    fn connect(&self) -> Result<BeszelClient, Box<dyn Error>> {
        let stored = self.store.load()?;
        let config = ClientConfig::resolve(self.url.clone(), self.token.clone(), &stored)?;
        debug!("Connecting to {}", config.base_url);
        Ok(config.connect()?)
    }

    fn json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn prompt(label: &str, default: Option<&str>) -> io::Result<String> {
    match default {
        Some(d) => eprint!("{} [{}]: ", label, d),
        None => eprint!("{}: ", label),
    }
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_string();

    Ok(match default {
        Some(d) if answer.is_empty() => d.to_string(),
        _ => answer,
    })
}

/// Hidden input on a terminal; piped stdin is read as a plain line
fn prompt_password() -> io::Result<String> {
    if io::stdin().is_terminal() {
        rpassword::prompt_password("Password: ")
    } else {
        prompt("Password", None)
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{} [y/N]", question), None)?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

pub fn run_login(
    ctx: &Context,
    server: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> CliResult {
    let url = match server.or_else(|| ctx.url.clone()) {
        Some(url) => url,
        None => {
            let current = ctx.store.load()?.url;
            match current {
                Some(current) => prompt("Beszel URL", Some(&current))?,
                None => prompt("Beszel URL (e.g. https://beszel.example.com)", None)?,
            }
        }
    };
    ctx.store.set_url(&url)?;

    let email = match email {
        Some(email) => email,
        None => prompt("Email", None)?,
    };
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let mut client = BeszelClient::new(&url, None)?;
    let token = client.login(&email, &password)?;
    client.close();

    ctx.store.set_token(&token)?;
    println!("Login successful!");
    println!("Config saved to {}", ctx.store.path().display());
    Ok(())
}

pub fn run_logout(ctx: &Context) -> CliResult {
    ctx.store.clear()?;
    println!("Logged out - credentials cleared");
    Ok(())
}

pub fn run_config_show(ctx: &Context) -> CliResult {
    let stored = ctx.store.load()?;
    println!("Config file: {}", ctx.store.path().display());
    println!("URL:   {}", stored.url.as_deref().unwrap_or("not set"));
    match stored.token {
        Some(token) => {
            let prefix: String = token.chars().take(20).collect();
            println!("Token: {}...", prefix);
        }
        None => println!("Token: not set"),
    }
    Ok(())
}

pub fn run_config_set_url(ctx: &Context, url: &str) -> CliResult {
    ctx.store.set_url(url)?;
    println!("URL set to {}", url);
    Ok(())
}

pub fn run_whoami(ctx: &Context) -> CliResult {
    let client = ctx.connect()?;
    let user = client.current_user()?;

    if ctx.json() {
        return print_json(&user);
    }
    println!("Email: {}", user.display_field("email"));
    println!("Name:  {}", user.display_field("name"));
    println!("ID:    {}", user.display_field("id"));
    println!("Role:  {}", user.str_field("role").unwrap_or("user"));
    Ok(())
}

pub fn run_systems(ctx: &Context, filter: &str) -> CliResult {
    let client = ctx.connect()?;
    let systems = client.get_systems(filter)?;

    if ctx.json() {
        return print_json(&systems);
    }

    let mut table = new_table(&["ID", "Name", "Host", "Port", "Status"]);
    for system in &systems {
        table.add_row(vec![
            Cell::new(system.display_field("id")),
            Cell::new(system.display_field("name")),
            Cell::new(system.display_field("host")),
            Cell::new(system.display_field("port")),
            status_cell(system),
        ]);
    }
    println!("{}", table);
    println!("{} system(s)", systems.len());
    Ok(())
}

pub fn run_system(ctx: &Context, system_id: &str) -> CliResult {
    let client = ctx.connect()?;
    let system = client.get_system(system_id)?;

    if ctx.json() {
        return print_json(&system);
    }

    println!("System: {}", system.display_field("name"));
    println!("ID:     {}", system.display_field("id"));
    println!("Host:   {}", system.display_field("host"));
    println!("Port:   {}", system.display_field("port"));
    println!("Status: {}", status_of(&system));

    let info = match system.object_field("info") {
        Some(info) if !info.is_empty() => info,
        _ => return Ok(()),
    };

    println!("\nSystem Info:");
    let present = |key: &str| !info.display_field(key).is_empty();
    if present("h") {
        println!("  Hostname: {}", info.display_field("h"));
    }
    if present("m") {
        println!("  CPU Model: {}", info.display_field("m"));
    }
    if present("c") {
        println!("  Cores: {} ({} threads)", info.display_field("c"), info.display_field("t"));
    }
    if present("k") {
        println!("  Kernel: {}", info.display_field("k"));
    }
    if present("v") {
        println!("  Agent Version: {}", info.display_field("v"));
    }
    for (key, label) in [("cpu", "CPU"), ("mp", "Memory"), ("dp", "Disk")] {
        if let Some(pct) = info.f64_field(key) {
            println!("  {}: {:.1}%", label, pct);
        }
    }
    Ok(())
}

pub fn run_system_update(
    ctx: &Context,
    system_id: &str,
    name: Option<String>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult {
    let mut data = Map::new();
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        data.insert("name".to_string(), Value::from(name));
    }
    if let Some(host) = host.filter(|h| !h.is_empty()) {
        data.insert("host".to_string(), Value::from(host));
    }
    if let Some(port) = port {
        data.insert("port".to_string(), Value::from(port));
    }
    if data.is_empty() {
        println!("No updates provided");
        return Ok(());
    }

    let client = ctx.connect()?;
    let system = client.update_system(system_id, &Value::Object(data))?;
    println!("Updated system: {}", system.display_field("name"));
    Ok(())
}

pub fn run_system_delete(ctx: &Context, system_id: &str, yes: bool) -> CliResult {
    if !yes && !confirm("Are you sure you want to delete this system?")? {
        println!("Aborted");
        return Ok(());
    }
    let client = ctx.connect()?;
    client.delete_system(system_id)?;
    println!("System deleted");
    Ok(())
}

fn bandwidth_at(stats: &Record, index: usize) -> f64 {
    stats
        .array_field("b")
        .and_then(|b| b.get(index))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

pub fn run_stats(ctx: &Context, system_id: &str, record_type: RecordType, limit: u32) -> CliResult {
    let client = ctx.connect()?;
    let records = client.get_system_stats(system_id, record_type.as_str(), limit)?;

    if ctx.json() {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No stats found");
        return Ok(());
    }

    let empty = Record::new();
    let mut table = new_table(&["Time", "CPU %", "Mem %", "Disk %", "Mem Used", "BW Sent/s", "BW Recv/s"]);
    for record in &records {
        let stats = record.object_field("stats").unwrap_or(&empty);
        table.add_row(vec![
            record.display_field("created"),
            format_number(stats, "cpu", 1),
            format_number(stats, "mp", 1),
            format_number(stats, "dp", 1),
            format!("{} GB", format_number(stats, "mu", 2)),
            format!("{}/s", format_bytes(bandwidth_at(stats, 0))),
            format!("{}/s", format_bytes(bandwidth_at(stats, 1))),
        ]);
    }
    println!("System Stats ({})", record_type);
    println!("{}", table);
    Ok(())
}

pub fn run_containers(ctx: &Context, system_id: &str) -> CliResult {
    let client = ctx.connect()?;
    let containers = client.get_containers(system_id)?;

    if ctx.json() {
        return print_json(&containers);
    }
    if containers.is_empty() {
        println!("No containers found");
        return Ok(());
    }

    let mut table = new_table(&["Name", "CPU %", "Memory", "Status", "Image"]);
    for container in &containers {
        let memory_mb = container.f64_field("memory").unwrap_or(0.0);
        table.add_row(vec![
            container.display_field("name"),
            format_number(container, "cpu", 2),
            format!("{:.0} MB", memory_mb),
            container.display_field("status"),
            container.display_field("image"),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn alert_system_name(alert: &Record) -> String {
    alert
        .object_field("expand")
        .and_then(|e| e.object_field("system"))
        .and_then(|s| s.str_field("name"))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| alert.display_field("system"))
}

pub fn run_alerts(ctx: &Context, system_id: &str) -> CliResult {
    let client = ctx.connect()?;
    let alerts = client.get_alerts(system_id)?;

    if ctx.json() {
        return print_json(&alerts);
    }
    if alerts.is_empty() {
        println!("No alerts found");
        return Ok(());
    }

    let mut table = new_table(&["ID", "System", "Name", "Value", "Triggered"]);
    for alert in &alerts {
        table.add_row(vec![
            alert.display_field("id"),
            alert_system_name(alert),
            alert.display_field("name"),
            alert.display_field("value"),
            alert.display_field("triggered"),
        ]);
    }
    println!("{}", table);
    Ok(())
}

pub fn run_alert_delete(ctx: &Context, alert_id: &str, yes: bool) -> CliResult {
    if !yes && !confirm("Are you sure you want to delete this alert?")? {
        println!("Aborted");
        return Ok(());
    }
    let client = ctx.connect()?;
    client.delete_alert(alert_id)?;
    println!("Alert deleted");
    Ok(())
}

pub fn run_alert_history(ctx: &Context, limit: u32) -> CliResult {
    let client = ctx.connect()?;
    let history = client.get_alert_history(limit)?;

    if ctx.json() {
        return print_json(&history);
    }
    if history.is_empty() {
        println!("No alert history found");
        return Ok(());
    }

    let mut table = new_table(&["ID", "Created", "User"]);
    for entry in &history {
        table.add_row(vec![
            entry.display_field("id"),
            entry.display_field("created"),
            entry.display_field("user"),
        ]);
    }
    println!("{}", table);
    Ok(())
}

pub fn run_records(
    ctx: &Context,
    collection: &str,
    filter: &str,
    sort: &str,
    limit: u32,
    expand: &str,
) -> CliResult {
    let client = ctx.connect()?;
    let query = ListQuery::new(collection)
        .per_page(limit)
        .filter(filter)
        .sort(sort)
        .expand(expand);
    let result = client.list_records(&query)?;

    if ctx.json() {
        return print_json(&result.items);
    }
    let first = match result.items.first() {
        Some(first) => first,
        None => {
            println!("No records found");
            return Ok(());
        }
    };

    let columns = scalar_columns(first, MAX_RECORD_COLUMNS);
    let header: Vec<&str> = columns.iter().map(String::as_str).collect();
    let mut table = new_table(&header);
    for item in &result.items {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| item.get(c).map(format_table_value).unwrap_or_default())
            .collect();
        table.add_row(cells);
    }
    println!("{} ({} total)", collection, result.total_items);
    println!("{}", table);
    Ok(())
}

pub fn run_record(ctx: &Context, collection: &str, record_id: &str, expand: &str) -> CliResult {
    let client = ctx.connect()?;
    let record = client.get_record(collection, record_id, expand)?;
    print_json(&record)
}
