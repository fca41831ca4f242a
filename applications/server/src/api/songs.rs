/// Song catalog API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use lyra_storage::{songs, Song};

/// GET /api/songs - List every song ordered by id
pub async fn list_songs(State(state): State<AppState>) -> Result<Json<Vec<Song>>> {
    let all = songs::get_all(&state.pool).await?;
    tracing::debug!(count = all.len(), "Listing songs");
    Ok(Json(all))
}
