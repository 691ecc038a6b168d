//! Comment CLI commands: list tabs, show a tab.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use chatboard_types::comment::Comment;

use super::{format_relative_time, truncate};
use crate::state::AppState;

/// Show the comments in `tab`, newest first.
pub async fn show_tab(state: &AppState, tab: &str, json: bool) -> Result<()> {
    let comments = state.hub.comments().list_tab(tab).await?;

    if json {
        let views: Vec<_> = comments.iter().map(Comment::view).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if comments.is_empty() {
        println!();
        println!(
            "  {} No comments in '{}' yet.",
            style("i").blue().bold(),
            style(tab).bold()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Comment").fg(Color::White),
        Cell::new("Posted").fg(Color::White),
    ]);

    for comment in &comments {
        table.add_row(vec![
            Cell::new(&comment.name).fg(Color::Cyan),
            Cell::new(truncate(&comment.text, 80)),
            Cell::new(format_relative_time(&comment.time)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} comment{} in {}",
        style(comments.len()).bold(),
        if comments.len() == 1 { "" } else { "s" },
        style(tab).cyan()
    );
    println!();

    Ok(())
}

/// List tabs that have comments.
pub async fn list_tabs(state: &AppState, json: bool) -> Result<()> {
    let tabs = state.hub.comments().list_tabs().await?;

    if json {
        let entries: Vec<_> = tabs
            .iter()
            .map(|(tab, count)| serde_json::json!({"tab": tab, "comments": count}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if tabs.is_empty() {
        println!();
        println!(
            "  {} No comments yet. Start the server with: {}",
            style("i").blue().bold(),
            style("cboard serve").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Tab").fg(Color::White),
        Cell::new("Comments").fg(Color::White),
    ]);

    for (tab, count) in &tabs {
        table.add_row(vec![Cell::new(tab).fg(Color::Cyan), Cell::new(count)]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} tab{}",
        style(tabs.len()).bold(),
        if tabs.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
