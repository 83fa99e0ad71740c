use std::path::Path;

use askama::Template;
use axum::Json;
use axum::extract::State;
use axum::response::{Html, Redirect};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::journal::{self, JournalEntry};
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogTemplate {
    entries: Vec<JournalEntry>,
}

pub async fn index() -> Result<Html<String>, ApiError> {
    Ok(Html(IndexTemplate {}.render()?))
}

pub async fn blog(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let entries = journal::load_entries(Path::new(&state.settings.journal_dir));
    Ok(Html(BlogTemplate { entries }.render()?))
}

pub async fn favicon() -> Redirect {
    Redirect::temporary("/static/favicon.svg")
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "parley-web"}))
}
