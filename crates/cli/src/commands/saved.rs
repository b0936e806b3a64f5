use anyhow::Result;
use cinesync_core::{MovieId, MovieSnapshot};
use serde_json::json;

use super::{print_json, with_code};
use crate::app::App;

pub(crate) async fn run_save(
    app: &App,
    id: MovieId,
    title: String,
    poster: Option<String>,
) -> Result<()> {
    let movie = MovieSnapshot::new(id, title, poster);
    let item = app.registry.save(&movie).await.map_err(with_code)?;
    print_json(&item)
}

pub(crate) async fn run_unsave(app: &App, id: MovieId) -> Result<()> {
    let removed = app.registry.remove(id).await.map_err(with_code)?;
    print_json(&json!({ "movie_id": id, "removed": removed }))
}

pub(crate) async fn run_saved(app: &App) -> Result<()> {
    let items = app.registry.list().await.map_err(with_code)?;
    print_json(&items)
}

pub(crate) async fn run_is_saved(app: &App, id: MovieId) -> Result<()> {
    let saved = app.registry.is_saved(id).await.map_err(with_code)?;
    print_json(&json!({ "movie_id": id, "saved": saved }))
}
