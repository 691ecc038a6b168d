//! News CLI command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use super::truncate;
use crate::state::AppState;

/// Print the cached headlines, refreshing the cache first when stale.
pub async fn show_news(state: &AppState, json: bool) -> Result<()> {
    let articles = state.news_service.get_cached_news().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!();
        println!("  {} The news cache is empty.", style("i").blue().bold());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Source").fg(Color::White),
        Cell::new("Published").fg(Color::White),
    ]);

    for article in &articles {
        let published = article
            .published_at()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| super::format_relative_time(&dt.with_timezone(&chrono::Utc)))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(truncate(article.title().unwrap_or("(untitled)"), 70)).fg(Color::Cyan),
            Cell::new(article.source_name().unwrap_or("-")),
            Cell::new(published).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} article{}",
        style(articles.len()).bold(),
        if articles.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
