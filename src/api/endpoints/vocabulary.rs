use axum::Json;
use serde::Serialize;

use crate::vocabulary::{DISEASES, SYMPTOMS};

#[derive(Serialize)]
pub struct VocabularyResponse {
    pub symptoms: &'static [&'static str],
    pub diseases: &'static [&'static str],
}

/// `GET /api/vocabulary`: both catalogs in positional order, duplicates kept.
pub async fn list() -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        symptoms: &SYMPTOMS,
        diseases: &DISEASES,
    })
}
