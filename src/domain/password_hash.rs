use super::Password;
use argon2::{
    password_hash::{self, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use color_eyre::eyre::{Result, WrapErr};
use secrecy::{ExposeSecret, Secret};

/// Salted Argon2id digest in PHC string format.
#[derive(Debug, Clone)]
pub struct MemberPasswordHash(Secret<String>);

impl PartialEq for MemberPasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl MemberPasswordHash {
    pub fn parse(s: Secret<String>) -> Result<Self> {
        let _hash = PasswordHash::new(s.expose_secret())
            .wrap_err("Failed to parse password hash")?;
        Ok(Self(s))
    }

    pub async fn from_password(password: &Password) -> Result<Self> {
        let hash = compute_password_hash(password.as_ref().to_owned()).await?;
        Ok(Self(hash))
    }

    /// `Ok(false)` means the candidate does not match; `Err` is reserved for
    /// malformed hashes and hasher failures.
    pub async fn matches(&self, candidate: &Password) -> Result<bool> {
        verify_password_hash(self.0.clone(), candidate.as_ref().to_owned())
            .await
    }
}

impl AsRef<Secret<String>> for MemberPasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<bool> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| -> Result<bool> {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())?;

            match Argon2::default().verify_password(
                password_candidate.expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e).wrap_err("failed to verify password hash"),
            }
        })
    })
    .await?
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let salt: SaltString =
                SaltString::generate(&mut rand::thread_rng());
            let password_hash = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None)?,
            )
            .hash_password(password.expose_secret().as_bytes(), &salt)?
            .to_string();

            Ok(Secret::new(password_hash))
        })
    })
    .await?
}
