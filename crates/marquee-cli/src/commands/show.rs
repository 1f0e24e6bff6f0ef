use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

use crate::output::{Output, OutputFormat};

pub async fn run_show(id: u64, output: &Output) -> Result<()> {
    tracing::debug!("Show command started: id={}", id);

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };

    let snapshot = orchestrator.snapshot();
    let Some(movie) = snapshot.all_movies.iter().find(|m| m.id == id) else {
        output.error(format!("No title with id {} in the catalog.", id));
        return Ok(());
    };

    // Drive the selection slot the way the detail page does, then render
    // from the snapshot that results.
    orchestrator.select(movie);
    let snapshot = orchestrator.snapshot();
    let Some(selected) = &snapshot.selected else {
        return Ok(());
    };

    let list_entry = snapshot.my_list.iter().find(|item| item.movie_id == id);
    let list_status = match list_entry {
        Some(item) if item.watched => "On your list (watched)",
        Some(_) => "On your list (not watched)",
        None => "Not on your list",
    };

    match output.format() {
        OutputFormat::Human if !output.is_quiet() => {
            println!();
            println!("{}", selected.title.bright_cyan().bold());

            let mut table = Table::new();
            table.add_row(vec![
                Cell::new("Type"),
                Cell::new(if selected.is_series() { "Series" } else { "Film" }),
            ]);
            table.add_row(vec![Cell::new("Genre"), Cell::new(&selected.genre)]);
            table.add_row(vec![Cell::new("Rating"), Cell::new(&selected.rating)]);
            table.add_row(vec![Cell::new("Length"), Cell::new(&selected.duration)]);
            table.add_row(vec![
                Cell::new("Released"),
                Cell::new(&selected.release_date),
            ]);
            table.add_row(vec![Cell::new("Director"), Cell::new(&selected.director)]);
            table.add_row(vec![Cell::new("Cast"), Cell::new(&selected.cast)]);
            table.add_row(vec![
                Cell::new("Age rating"),
                Cell::new(&selected.age_rating),
            ]);
            match selected.badge.as_str() {
                "top10" => {
                    table.add_row(vec![
                        Cell::new("Badge"),
                        Cell::new("Top 10").fg(comfy_table::Color::Yellow),
                    ]);
                }
                "new" => {
                    table.add_row(vec![
                        Cell::new("Badge"),
                        Cell::new("New").fg(comfy_table::Color::Green),
                    ]);
                }
                _ => {}
            }
            table.add_row(vec![
                Cell::new("Poster"),
                Cell::new(&selected.poster.portrait),
            ]);
            table.add_row(vec![Cell::new("My list"), Cell::new(list_status)]);
            table.add_row(vec![Cell::new("Synopsis"), Cell::new(&selected.synopsis)]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Human => {}
        _ => {
            output.json(&json!({
                "movie": selected,
                "onList": list_entry.is_some(),
                "watched": list_entry.map(|item| item.watched).unwrap_or(false),
            }));
        }
    }

    // Leaving the page clears the selection slot
    orchestrator.clear_selection();

    Ok(())
}
