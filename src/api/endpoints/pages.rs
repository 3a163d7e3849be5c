//! HTML shell pages.
//!
//! `GET` renders a page blank; `POST` is the page's submit action and
//! re-renders it with the outcome. A rejected submission answers 422 with the
//! error region in place of a result.

use std::collections::HashMap;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::Form;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Page;
use crate::shell::{self, PageView};

fn page_from_slug(slug: &str) -> Result<Page, ApiError> {
    slug.parse()
        .map_err(|_| ApiError::NotFound(format!("No page named '{slug}'")))
}

/// `GET /`: land on the first sidebar entry.
pub async fn root() -> Redirect {
    Redirect::to(&format!("/pages/{}", Page::DEFAULT.as_str()))
}

/// `GET /pages/:page`
pub async fn show(Path(slug): Path<String>) -> Result<Html<String>, ApiError> {
    let page = page_from_slug(&slug)?;
    Ok(Html(shell::render_page(&PageView::blank(page))))
}

/// `POST /pages/:page`
pub async fn submit(
    State(ctx): State<ApiContext>,
    Path(slug): Path<String>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<(StatusCode, Html<String>), ApiError> {
    let page = page_from_slug(&slug)?;
    let Form(values) = form.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let view = shell::submit(ctx.core.clone(), page, values).await?;
    let status = match &view.outcome {
        Some(outcome) if outcome.is_rejected() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    Ok((status, Html(shell::render_page(&view))))
}
