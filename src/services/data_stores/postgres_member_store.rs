use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;

use crate::domain::{
    LoginId, Member, MemberId, MemberPasswordHash, MemberStore,
    MemberStoreError, Nickname,
};

const MEMBER_COLUMNS: &str = "id, login_id, password_hash, nickname, point, \
     position_id, address_id, created_at, updated_at";

pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: uuid::Uuid,
    login_id: String,
    password_hash: String,
    nickname: String,
    point: i32,
    position_id: Option<i32>,
    address_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = MemberStoreError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member {
            id: MemberId::new(row.id),
            login_id: LoginId::parse(row.login_id)
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
            hash: MemberPasswordHash::parse(Secret::new(row.password_hash))
                .map_err(MemberStoreError::UnexpectedError)?,
            nickname: Nickname::parse(row.nickname)
                .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?,
            point: row.point,
            position_id: row.position_id,
            address_id: row.address_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Unique violations are the authoritative duplicate signal; the existence
/// checks run before an insert can race with a concurrent sign-up.
fn map_write_error(e: sqlx::Error) -> MemberStoreError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("members_nickname_key") => {
                    MemberStoreError::NicknameExists
                }
                _ => MemberStoreError::LoginIdExists,
            }
        }
        err => MemberStoreError::UnexpectedError(eyre!(err)),
    }
}

#[async_trait::async_trait]
impl MemberStore for PostgresMemberStore {
    #[tracing::instrument(name = "Adding member to PostgreSQL", skip_all)]
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        sqlx::query(
            r#"
            INSERT INTO members (id, login_id, password_hash, nickname, point,
                                 position_id, address_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(*member.id.as_ref())
        .bind(member.login_id.as_ref())
        .bind(member.hash.as_ref().expose_secret())
        .bind(member.nickname.as_ref())
        .bind(member.point)
        .bind(member.position_id)
        .bind(member.address_id)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving member from PostgreSQL", skip_all)]
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(*id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(MemberStoreError::MemberNotFound)?
        .try_into()
    }

    #[tracing::instrument(
        name = "Retrieving member by login ID from PostgreSQL",
        skip_all
    )]
    async fn get_member_by_login_id(
        &self,
        login_id: &LoginId,
    ) -> Result<Member, MemberStoreError> {
        sqlx::query_as::<_, MemberRow>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE login_id = $1"
        ))
        .bind(login_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(MemberStoreError::MemberNotFound)?
        .try_into()
    }

    #[tracing::instrument(name = "Checking login ID in PostgreSQL", skip_all)]
    async fn login_id_exists(
        &self,
        login_id: &LoginId,
    ) -> Result<bool, MemberStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE login_id = $1)",
        )
        .bind(login_id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Checking nickname in PostgreSQL", skip_all)]
    async fn nickname_exists(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, MemberStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE nickname = $1)",
        )
        .bind(nickname.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Updating nickname in PostgreSQL", skip_all)]
    async fn update_nickname(
        &mut self,
        id: &MemberId,
        nickname: &Nickname,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query(
            "UPDATE members SET nickname = $2, updated_at = now() WHERE id = $1",
        )
        .bind(*id.as_ref())
        .bind(nickname.as_ref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating password in PostgreSQL", skip_all)]
    async fn update_password(
        &mut self,
        id: &MemberId,
        hash: &MemberPasswordHash,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query(
            "UPDATE members SET password_hash = $2, updated_at = now() WHERE id = $1",
        )
        .bind(*id.as_ref())
        .bind(hash.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting member from PostgreSQL", skip_all)]
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(*id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| MemberStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(MemberStoreError::MemberNotFound);
        }
        Ok(())
    }
}
