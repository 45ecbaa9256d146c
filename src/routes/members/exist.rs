use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    app_state::AppState,
    domain::{LoginId, MemberAPIError, Nickname},
};

/// 200 while the login ID is still available, 409 once it is taken.
#[tracing::instrument(name = "Login ID availability route handler", skip_all)]
pub async fn login_id_exist(
    State(state): State<AppState>,
    Path(login_id): Path<String>,
) -> Result<StatusCode, MemberAPIError> {
    let login_id = LoginId::parse(login_id)?;

    match state.member_registry.is_login_id_exist(&login_id).await? {
        true => Err(MemberAPIError::IdDuplicated),
        false => Ok(StatusCode::OK),
    }
}

#[tracing::instrument(name = "Nickname availability route handler", skip_all)]
pub async fn nickname_exist(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<StatusCode, MemberAPIError> {
    let nickname = Nickname::parse(nickname)?;

    match state.member_registry.is_nickname_exist(&nickname).await? {
        true => Err(MemberAPIError::NicknameDuplicated),
        false => Ok(StatusCode::OK),
    }
}
