use catalog_sync_core::StateOrchestrator;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::ListCommands;

pub async fn run_list(cmd: ListCommands, output: &Output) -> Result<()> {
    tracing::debug!("List command started");

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };

    match cmd {
        ListCommands::Show => show_list(&orchestrator, output),
        ListCommands::Add { movie_id } => add_to_list(&orchestrator, movie_id, output).await,
        ListCommands::Rm { movie_id } => remove_from_list(&orchestrator, movie_id, output).await,
        ListCommands::Watched {
            movie_id,
            not_watched,
        } => set_watched(&orchestrator, movie_id, !not_watched, output).await,
    }
}

fn show_list(orchestrator: &StateOrchestrator, output: &Output) -> Result<()> {
    let snapshot = orchestrator.snapshot();

    if snapshot.my_list.is_empty() {
        output.info("Your list is empty. Add titles with 'marquee list add <movie-id>'.");
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut dangling = 0usize;
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Movie ID").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Watched").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Added").add_attribute(comfy_table::Attribute::Bold),
            ]);
            for item in &snapshot.my_list {
                let title = snapshot
                    .all_movies
                    .iter()
                    .find(|movie| movie.id == item.movie_id)
                    .map(|movie| movie.title.as_str());
                if title.is_none() {
                    dangling += 1;
                }
                table.add_row(vec![
                    Cell::new(item.movie_id),
                    Cell::new(title.unwrap_or("(no longer in the catalog)")),
                    Cell::new(if item.watched { "✓" } else { "" }),
                    Cell::new(item.created_at.format("%Y-%m-%d")),
                ]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            if dangling > 0 {
                output.warn(format!(
                    "{} of these point at titles no longer in the catalog.",
                    dangling
                ));
            }
        }
        _ => {
            let items: Vec<_> = snapshot
                .my_list
                .iter()
                .map(|item| {
                    let title = snapshot
                        .all_movies
                        .iter()
                        .find(|movie| movie.id == item.movie_id)
                        .map(|movie| movie.title.clone());
                    json!({
                        "id": item.id,
                        "movieId": item.movie_id,
                        "title": title,
                        "watched": item.watched,
                        "createdAt": item.created_at,
                    })
                })
                .collect();
            output.json(&json!({ "items": items }));
        }
    }

    Ok(())
}

async fn add_to_list(
    orchestrator: &StateOrchestrator,
    movie_id: u64,
    output: &Output,
) -> Result<()> {
    let snapshot = orchestrator.snapshot();
    let Some(movie) = snapshot.all_movies.iter().find(|m| m.id == movie_id) else {
        output.error(format!("No title with id {} in the catalog.", movie_id));
        return Ok(());
    };
    if snapshot.my_list.iter().any(|item| item.movie_id == movie_id) {
        output.info(format!("\"{}\" is already on your list.", movie.title));
        return Ok(());
    }

    orchestrator.add_to_watchlist(movie).await;

    let after = orchestrator.snapshot();
    match &after.last_error {
        Some(error) => output.error(error),
        None => output.success(format!("Added \"{}\" to your list.", movie.title)),
    }

    Ok(())
}

async fn remove_from_list(
    orchestrator: &StateOrchestrator,
    movie_id: u64,
    output: &Output,
) -> Result<()> {
    let snapshot = orchestrator.snapshot();
    let label = snapshot
        .all_movies
        .iter()
        .find(|movie| movie.id == movie_id)
        .map(|movie| format!("\"{}\"", movie.title))
        .unwrap_or_else(|| format!("movie {}", movie_id));
    let was_listed = snapshot.my_list.iter().any(|item| item.movie_id == movie_id);

    orchestrator.remove_from_watchlist(movie_id).await;

    let after = orchestrator.snapshot();
    if let Some(error) = &after.last_error {
        output.error(error);
        return Ok(());
    }

    if was_listed {
        output.success(format!("Removed {} from your list.", label));
    } else {
        output.info(format!("{} was not on your list.", label));
    }

    Ok(())
}

async fn set_watched(
    orchestrator: &StateOrchestrator,
    movie_id: u64,
    watched: bool,
    output: &Output,
) -> Result<()> {
    let snapshot = orchestrator.snapshot();
    let label = snapshot
        .all_movies
        .iter()
        .find(|movie| movie.id == movie_id)
        .map(|movie| format!("\"{}\"", movie.title))
        .unwrap_or_else(|| format!("movie {}", movie_id));

    orchestrator.set_watched(movie_id, watched).await;

    let after = orchestrator.snapshot();
    match &after.last_error {
        Some(error) => output.error(error),
        None => output.success(format!(
            "Marked {} as {}.",
            label,
            if watched { "watched" } else { "not watched" }
        )),
    }

    Ok(())
}
