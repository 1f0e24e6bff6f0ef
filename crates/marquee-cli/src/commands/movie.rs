use catalog_sync_core::messages;
use catalog_sync_models::{MovieDraft, NotificationKind};
use clap::Args;
use color_eyre::Result;
use serde_json::json;

use super::prompts;
use crate::output::{Output, OutputFormat};

/// Field flags shared by `movie add` and `movie edit`. Every flag is
/// optional; omitted flags keep the form defaults (or, for edit, the
/// entry's current values).
#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Title (required to submit)
    #[arg(long)]
    pub title: Option<String>,

    /// Short synopsis
    #[arg(long)]
    pub synopsis: Option<String>,

    /// Genre label
    #[arg(long)]
    pub genre: Option<String>,

    /// Display rating, e.g. "4.5/5"
    #[arg(long)]
    pub rating: Option<String>,

    /// Running time ("2h 10m") or episode count ("16 eps")
    #[arg(long)]
    pub duration: Option<String>,

    /// Release date label
    #[arg(long)]
    pub release_date: Option<String>,

    /// Director credit
    #[arg(long)]
    pub director: Option<String>,

    /// Cast line
    #[arg(long)]
    pub cast: Option<String>,

    /// Age rating label, e.g. "16+"
    #[arg(long)]
    pub age_rating: Option<String>,
}

impl DraftArgs {
    fn apply_to(self, draft: &mut MovieDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(synopsis) = self.synopsis {
            draft.synopsis = synopsis;
        }
        if let Some(genre) = self.genre {
            draft.genre = genre;
        }
        if let Some(rating) = self.rating {
            draft.rating = rating;
        }
        if let Some(duration) = self.duration {
            draft.duration = duration;
        }
        if let Some(release_date) = self.release_date {
            draft.release_date = release_date;
        }
        if let Some(director) = self.director {
            draft.director = director;
        }
        if let Some(cast) = self.cast {
            draft.cast = cast;
        }
        if let Some(age_rating) = self.age_rating {
            draft.age_rating = age_rating;
        }
    }
}

pub async fn run_movie(cmd: crate::MovieCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::MovieCommands::Add { fields } => add_movie(fields, output).await,
        crate::MovieCommands::Edit { id, fields } => edit_movie(id, fields, output).await,
        crate::MovieCommands::Rm { id, yes } => remove_movie(id, yes, output).await,
    }
}

async fn add_movie(fields: DraftArgs, output: &Output) -> Result<()> {
    tracing::debug!("Movie add command started");

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };

    let mut draft = MovieDraft::default();
    fields.apply_to(&mut draft);

    // Same validation the entry form runs before dispatching
    if draft.title.trim().is_empty() {
        orchestrator.show_notification(messages::TITLE_REQUIRED, NotificationKind::Error);
        output.toast(&orchestrator.snapshot().notification);
        return Ok(());
    }

    orchestrator.create_movie(draft).await;

    let snapshot = orchestrator.snapshot();
    match output.format() {
        OutputFormat::Human => {
            output.toast(&snapshot.notification);
            if let Some(created) = snapshot.all_movies.last() {
                output.info(format!(
                    "\"{}\" is catalog id {}.",
                    created.title, created.id
                ));
            }
        }
        _ => {
            output.json(&json!({
                "notification": snapshot.notification,
                "created": snapshot.all_movies.last(),
            }));
        }
    }

    Ok(())
}

async fn edit_movie(id: u64, fields: DraftArgs, output: &Output) -> Result<()> {
    tracing::debug!("Movie edit command started: id={}", id);

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };

    let snapshot = orchestrator.snapshot();
    let Some(existing) = snapshot.all_movies.iter().find(|m| m.id == id) else {
        output.error(format!("No title with id {} in the catalog.", id));
        return Ok(());
    };

    // The edit form opens prefilled with the current text fields. Poster
    // art and the badge are not on the form, so a submit resets them.
    let mut draft = MovieDraft {
        title: existing.title.clone(),
        synopsis: existing.synopsis.clone(),
        genre: existing.genre.clone(),
        rating: existing.rating.clone(),
        duration: existing.duration.clone(),
        release_date: existing.release_date.clone(),
        director: existing.director.clone(),
        cast: existing.cast.clone(),
        age_rating: existing.age_rating.clone(),
        ..MovieDraft::default()
    };
    fields.apply_to(&mut draft);

    if draft.title.trim().is_empty() {
        orchestrator.show_notification(messages::TITLE_REQUIRED, NotificationKind::Error);
        output.toast(&orchestrator.snapshot().notification);
        return Ok(());
    }

    orchestrator.update_movie(id, draft).await;

    let after = orchestrator.snapshot();
    match output.format() {
        OutputFormat::Human => output.toast(&after.notification),
        _ => {
            output.json(&json!({
                "notification": after.notification,
                "updated": after.all_movies.iter().find(|m| m.id == id),
            }));
        }
    }

    Ok(())
}

async fn remove_movie(id: u64, yes: bool, output: &Output) -> Result<()> {
    tracing::debug!("Movie rm command started: id={}", id);

    let Some(orchestrator) = super::bootstrap_session(output).await? else {
        return Ok(());
    };

    let snapshot = orchestrator.snapshot();
    let Some(existing) = snapshot.all_movies.iter().find(|m| m.id == id) else {
        output.error(format!("No title with id {} in the catalog.", id));
        return Ok(());
    };

    if !yes {
        let confirmed = prompts::prompt_yes_no(
            &format!("Delete \"{}\" from the catalog?", existing.title),
            Some(false),
        )?;
        if !confirmed {
            output.info("Aborted.");
            return Ok(());
        }
    }

    let listed = snapshot.my_list.iter().any(|item| item.movie_id == id);

    orchestrator.delete_movie(id).await;

    let after = orchestrator.snapshot();
    match output.format() {
        OutputFormat::Human => {
            output.toast(&after.notification);
            if listed {
                output.warn(
                    "Your list still has an entry for this title; it will show as no longer in the catalog.",
                );
            }
        }
        _ => {
            output.json(&json!({
                "notification": after.notification,
                "deletedId": id,
            }));
        }
    }

    Ok(())
}
