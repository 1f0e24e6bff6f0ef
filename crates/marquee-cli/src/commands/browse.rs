use catalog_sync_models::Movie;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::output::{Output, OutputFormat};

pub async fn run_browse(series: bool, films: bool, output: &Output) -> Result<()> {
    tracing::debug!("Browse command started: series={}, films={}", series, films);

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };
    let snapshot = orchestrator.snapshot();

    let titles: Vec<&Movie> = snapshot
        .all_movies
        .iter()
        .filter(|movie| {
            if series {
                movie.is_series()
            } else if films {
                !movie.is_series()
            } else {
                true
            }
        })
        .collect();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Type").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Genre").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Length").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Badge").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("On List").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for movie in &titles {
                let on_list = snapshot.my_list.iter().any(|item| item.movie_id == movie.id);
                table.add_row(vec![
                    Cell::new(movie.id),
                    Cell::new(&movie.title),
                    Cell::new(if movie.is_series() { "Series" } else { "Film" }),
                    Cell::new(&movie.genre),
                    Cell::new(&movie.rating),
                    Cell::new(&movie.duration),
                    badge_cell(&movie.badge),
                    Cell::new(if on_list { "✓" } else { "" }),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            output.info(format!(
                "{} titles shown, {} on your list",
                titles.len(),
                snapshot.my_list.len()
            ));
        }
        _ => {
            output.json(&json!({
                "movies": titles,
                "myListCount": snapshot.my_list.len(),
            }));
        }
    }

    Ok(())
}

fn badge_cell(badge: &str) -> Cell {
    match badge {
        "top10" => Cell::new("Top 10").fg(comfy_table::Color::Yellow),
        "new" => Cell::new("New").fg(comfy_table::Color::Green),
        _ => Cell::new(""),
    }
}
