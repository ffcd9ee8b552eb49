//! List recently opened projects.

use chrono::{TimeZone, Utc};

use cutline_common::config::AppConfig;
use cutline_project_model::RecentProjectsStore;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let store = RecentProjectsStore::new(&config.recent_projects_file);
    let recent = store.list();

    if recent.is_empty() {
        println!("No recent projects.");
        return Ok(());
    }

    println!("Recent projects ({}):", recent.len());
    for entry in recent.entries() {
        let opened = Utc
            .timestamp_millis_opt(entry.last_modified)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {:<24} {}  {:>8} B  {}",
            entry.name, opened, entry.size, entry.path
        );
    }

    Ok(())
}
