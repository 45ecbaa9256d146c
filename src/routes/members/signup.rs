use axum::{extract::State, http::StatusCode, Json};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{LoginId, MemberAPIError, NewMember, Nickname, Password},
};

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), MemberAPIError> {
    let new_member = NewMember {
        login_id: LoginId::parse(request.login_id)?,
        password: Password::parse(request.password)?,
        nickname: Nickname::parse(request.nickname)?,
        position_id: request.position_id,
        address_id: request.address_id,
    };

    let id = state.member_registry.sign_up(new_member).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: *id.as_ref(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub password: Secret<String>,
    pub nickname: String,
    #[serde(rename = "positionId", default)]
    pub position_id: Option<i32>,
    #[serde(rename = "addressId", default)]
    pub address_id: Option<i32>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: uuid::Uuid,
}
