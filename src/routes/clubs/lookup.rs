use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ClubResponse;
use crate::{
    app_state::AppState,
    domain::{ClubAPIError, ClubName},
};

/// 200 while the name is still available, 409 once a club uses it.
#[tracing::instrument(name = "Club name availability route handler", skip_all)]
pub async fn club_name_exist(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ClubAPIError> {
    let name = ClubName::parse(&name)?;

    match state.club_registry.is_name_exist(&name).await? {
        true => Err(ClubAPIError::ClubNameDuplicated),
        false => Ok(StatusCode::OK),
    }
}

#[tracing::instrument(name = "Get club by name route handler", skip_all)]
pub async fn get_club_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<ClubResponse>), ClubAPIError> {
    let name = ClubName::parse(&name)?;

    let club = state.club_registry.get_club_by_name(&name).await?;

    Ok((StatusCode::OK, Json(ClubResponse::from(club))))
}
