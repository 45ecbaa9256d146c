use color_eyre::eyre::{eyre, Result, WrapErr};
use redis::{Commands, Connection};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{BannedTokenStore, BannedTokenStoreError},
    utils::auth::TOKEN_TTL_SECONDS,
};

/// Revoked session tokens, expiring together with the JWT they revoke.
pub struct RedisBannedTokenStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisBannedTokenStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(name = "Banning session token in Redis", skip_all)]
    async fn add_token(&mut self, token: &Secret<String>) -> Result<()> {
        let ttl_seconds: u64 = TOKEN_TTL_SECONDS
            .try_into()
            .wrap_err("failed to cast TOKEN_TTL_SECONDS to u64")?;

        self.conn
            .write()
            .await
            .set_ex::<_, _, ()>(session_key(token), true, ttl_seconds)
            .wrap_err("failed to store banned session token in Redis")?;

        Ok(())
    }

    #[tracing::instrument(name = "Checking session token in Redis", skip_all)]
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError> {
        let banned: bool = self
            .conn
            .write()
            .await
            .exists(session_key(token))
            .map_err(|e| {
                BannedTokenStoreError::UnexpectedError(
                    eyre!(e).wrap_err("failed to look up session token"),
                )
            })?;

        match banned {
            true => Err(BannedTokenStoreError::BannedToken),
            false => Ok(()),
        }
    }
}

const BANNED_SESSION_KEY_PREFIX: &str = "club_manager:banned_session:";

fn session_key(token: &Secret<String>) -> String {
    format!("{}{}", BANNED_SESSION_KEY_PREFIX, token.expose_secret())
}

#[test]
fn test_session_keys_are_prefixed() {
    let key = session_key(&Secret::new("abc.def.ghi".to_owned()));
    assert_eq!(key, "club_manager:banned_session:abc.def.ghi");
}
