use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Nickname},
    utils::auth::AuthContext,
};

#[tracing::instrument(name = "Update nickname route handler", skip_all)]
pub async fn update_nickname(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpdateNicknameRequest>,
) -> Result<StatusCode, MemberAPIError> {
    let nickname = Nickname::parse(request.nickname)?;

    state.member_registry.update_nickname(&auth, nickname).await?;

    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
pub struct UpdateNicknameRequest {
    pub nickname: String,
}
