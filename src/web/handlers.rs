// HTTP handlers

use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};

use super::page::{self, Banner, FetchForm};
use super::state::{AppContext, AppState};
use crate::downloader::tools::ToolInfo;
use crate::downloader::utils::{default_download_dir, expand_home};
use crate::downloader::DownloadError;
use crate::packaging::zip_download_folder;

fn default_form() -> FetchForm {
    FetchForm::with_output_dir(default_download_dir().to_string_lossy())
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&default_form(), &state.config.limits, None))
}

pub async fn fetch(State(state): State<AppState>, Form(mut form): Form<FetchForm>) -> Html<String> {
    if form.output_dir.trim().is_empty() {
        form.output_dir = default_form().output_dir;
    }

    let banner = match perform_fetch(&state, &form).await {
        Ok(message) => Banner::Success(message),
        Err(e) => Banner::Error(error_message(&e)),
    };
    if let Banner::Error(message) = &banner {
        tracing::warn!(url = %form.url, %message, "fetch failed");
    }

    Html(page::render(&form, &state.config.limits, Some(&banner)))
}

pub async fn tools(State(state): State<AppState>) -> Json<Vec<ToolInfo>> {
    Json(state.tools.get_all_tools().await)
}

pub async fn health() -> &'static str {
    "OK"
}

/// Known failures are shown as-is; anything else gets a generic prefix.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DownloadError>() {
        Some(e) => e.to_string(),
        None => format!("Unexpected error: {:#}", err),
    }
}

async fn perform_fetch(ctx: &AppContext, form: &FetchForm) -> anyhow::Result<String> {
    let request = form.to_request();
    let limits = &ctx.config.limits;

    if !request.playlist {
        let path = ctx.downloader.download_video(&request, limits).await?;
        return Ok(format!("Saved to {}", path.display()));
    }

    let files = ctx.downloader.download_playlist(&request, limits).await?;
    let count = files.len();

    if form.wants_zip() {
        let zip = tokio::task::spawn_blocking(move || zip_download_folder(&files)).await??;
        return Ok(format!(
            "Downloaded {} items and zipped to {}",
            count,
            zip.display()
        ));
    }

    Ok(format!(
        "Downloaded {} items to {}",
        count,
        expand_home(&request.output_dir).display()
    ))
}
