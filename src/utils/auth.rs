use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use color_eyre::eyre::{eyre, Context, ContextCompat, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::{AppState, BannedTokenStoreType},
    domain::{BannedTokenStoreError, LoginId, MemberAPIError, MemberId},
};

use super::constants::{JWT_COOKIE_NAME, JWT_SECRET};

// Create cookie with a new JWT auth token
#[tracing::instrument(name = "Generating auth cookie", skip_all)]
pub fn generate_auth_cookie(
    login_id: &LoginId,
    member_id: &MemberId,
) -> Result<Cookie<'static>> {
    let token = generate_auth_token(login_id, member_id)?;
    Ok(create_auth_cookie(token))
}

#[tracing::instrument(name = "Creating auth cookie", skip_all)]
fn create_auth_cookie(token: Secret<String>) -> Cookie<'static> {
    Cookie::build((JWT_COOKIE_NAME, token.expose_secret().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// How long a session token stays valid
pub const TOKEN_TTL_SECONDS: i64 = 600;

#[tracing::instrument(name = "Generating auth token", skip_all)]
fn generate_auth_token(
    login_id: &LoginId,
    member_id: &MemberId,
) -> Result<Secret<String>> {
    let delta = chrono::Duration::try_seconds(TOKEN_TTL_SECONDS)
        .wrap_err("failed to create token TTL delta")?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(eyre!("failed to add to current time"))?
        .timestamp();

    let exp: usize = exp.try_into().wrap_err(format!(
        "failed to cast exp time to usize. exp time: {}",
        exp
    ))?;

    let claims = Claims {
        sub: login_id.as_ref().to_owned(),
        id: *member_id,
        exp,
    };

    create_token(&claims)
}

/// Rejects banned tokens before decoding. Store failures are reported as
/// unexpected errors rather than as an invalid session.
#[tracing::instrument(name = "Validating auth token", skip_all)]
pub async fn validate_token(
    token: &Secret<String>,
    banned_token_store: &BannedTokenStoreType,
) -> Result<Claims, MemberAPIError> {
    banned_token_store
        .read()
        .await
        .check_token(token)
        .await
        .map_err(|e| match e {
            BannedTokenStoreError::BannedToken => MemberAPIError::InvalidToken,
            BannedTokenStoreError::UnexpectedError(report) => {
                MemberAPIError::UnexpectedError(report)
            }
        })?;

    decode::<Claims>(
        token.expose_secret(),
        &DecodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("failed to decode token: {e}");
        MemberAPIError::InvalidToken
    })
}

#[tracing::instrument(name = "Creating auth token", skip_all)]
fn create_token(claims: &Claims) -> Result<Secret<String>> {
    let token_string = encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.expose_secret().as_bytes()),
    )
    .wrap_err("failed to create token")?;

    Ok(Secret::new(token_string))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id: MemberId,
    pub exp: usize,
}

/// The member behind the current request, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub member_id: MemberId,
    pub login_id: LoginId,
    pub token: Secret<String>,
}

#[tracing::instrument(name = "Resolving auth context", skip_all)]
pub async fn get_auth_context(
    jar: &CookieJar,
    banned_token_store: &BannedTokenStoreType,
) -> Result<AuthContext, MemberAPIError> {
    let cookie = jar
        .get(JWT_COOKIE_NAME)
        .ok_or(MemberAPIError::MissingToken)?;
    let token = Secret::new(cookie.value().to_owned());

    let claims = validate_token(&token, banned_token_store).await?;
    let login_id =
        LoginId::parse(claims.sub).map_err(|_| MemberAPIError::InvalidToken)?;

    Ok(AuthContext {
        member_id: claims.id,
        login_id,
        token,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = MemberAPIError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        get_auth_context(&jar, &state.banned_token_store).await
    }
}

/// Bans the session token so it cannot be replayed before it expires.
pub async fn revoke_session(
    auth: &AuthContext,
    banned_token_store: &BannedTokenStoreType,
) -> Result<(), MemberAPIError> {
    banned_token_store
        .write()
        .await
        .add_token(&auth.token)
        .await
        .map_err(MemberAPIError::UnexpectedError)
}

pub fn remove_auth_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::from(JWT_COOKIE_NAME))
}
