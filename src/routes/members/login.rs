use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{LoginId, MemberAPIError, Password},
    utils::auth::generate_auth_cookie,
};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), MemberAPIError> {
    // Malformed input can never match a stored account
    let login_id = LoginId::parse(request.login_id)
        .map_err(|_| MemberAPIError::IncorrectCredentials)?;
    let password = Password::parse(request.password)
        .map_err(|_| MemberAPIError::IncorrectCredentials)?;

    let member = state
        .member_registry
        .get_member_by_login_id_and_password(&login_id, &password)
        .await?
        .ok_or(MemberAPIError::IncorrectCredentials)?;

    let auth_cookie = generate_auth_cookie(&member.login_id, &member.id)
        .map_err(MemberAPIError::UnexpectedError)?;

    let response = Json(LoginResponse {
        id: *member.id.as_ref(),
        login_id: member.login_id.as_ref().to_owned(),
        nickname: member.nickname.as_ref().to_owned(),
    });

    Ok((StatusCode::OK, jar.add(auth_cookie), response))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub password: Secret<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: uuid::Uuid,
    #[serde(rename = "loginId")]
    pub login_id: String,
    pub nickname: String,
}
