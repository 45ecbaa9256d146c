use chrono::{DateTime, Utc};
use color_eyre::eyre::{eyre, Result};
use sqlx::{PgExecutor, PgPool};

use crate::domain::{
    Club, ClubId, ClubMember, ClubMemberFilter, ClubMemberId, ClubName,
    ClubRole, ClubStore, ClubStoreError, MemberId, MonthlyFee,
};

const CLUB_COLUMNS: &str = "id, name, leader, address_id, point, monthly_fee, \
     created_at, updated_at";
const CLUB_MEMBER_COLUMNS: &str =
    "id, club_id, member_id, role, approved, payment_status";

pub struct PostgresClubStore {
    pool: PgPool,
}

impl PostgresClubStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClubRow {
    id: uuid::Uuid,
    name: String,
    leader: uuid::Uuid,
    address_id: Option<i32>,
    point: i32,
    monthly_fee: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClubRow> for Club {
    type Error = ClubStoreError;

    fn try_from(row: ClubRow) -> Result<Self, Self::Error> {
        Ok(Club {
            id: ClubId::new(row.id),
            name: ClubName::parse(&row.name)
                .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?,
            leader: MemberId::new(row.leader),
            address_id: row.address_id,
            point: row.point,
            monthly_fee: MonthlyFee::parse(row.monthly_fee)
                .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ClubMemberRow {
    id: uuid::Uuid,
    club_id: uuid::Uuid,
    member_id: uuid::Uuid,
    role: String,
    approved: bool,
    payment_status: bool,
}

impl TryFrom<ClubMemberRow> for ClubMember {
    type Error = ClubStoreError;

    fn try_from(row: ClubMemberRow) -> Result<Self, Self::Error> {
        Ok(ClubMember {
            id: ClubMemberId::new(row.id),
            club_id: ClubId::new(row.club_id),
            member_id: MemberId::new(row.member_id),
            role: row
                .role
                .parse::<ClubRole>()
                .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?,
            approved: row.approved,
            payment_status: row.payment_status,
        })
    }
}

fn map_write_error(e: sqlx::Error) -> ClubStoreError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("clubs_name_key") => ClubStoreError::ClubNameExists,
                _ => ClubStoreError::ClubMemberExists,
            }
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            let constraint = db_err.constraint().map(str::to_owned);
            match constraint {
                Some(constraint) => foreign_key_error(&constraint),
                None => ClubStoreError::UnexpectedError(eyre!(
                    sqlx::Error::Database(db_err)
                )),
            }
        }
        err => ClubStoreError::UnexpectedError(eyre!(err)),
    }
}

fn foreign_key_error(constraint: &str) -> ClubStoreError {
    match constraint {
        "clubs_leader_fkey" | "club_members_member_id_fkey" => {
            ClubStoreError::MemberNotFound
        }
        "club_members_club_id_fkey" => ClubStoreError::ClubNotFound,
        other => ClubStoreError::UnexpectedError(eyre!(
            "unexpected foreign key violation: {other}"
        )),
    }
}

fn filter_clause(filter: ClubMemberFilter) -> &'static str {
    match filter {
        ClubMemberFilter::Approved => "approved",
        ClubMemberFilter::Pending => "NOT approved",
        ClubMemberFilter::Paid => "approved AND payment_status",
        ClubMemberFilter::NotPaid => "approved AND NOT payment_status",
    }
}

fn collect_rows(
    rows: Vec<ClubMemberRow>,
) -> Result<Vec<ClubMember>, ClubStoreError> {
    rows.into_iter().map(ClubMember::try_from).collect()
}

async fn insert_club_member<'e>(
    executor: impl PgExecutor<'e>,
    club_member: &ClubMember,
) -> Result<(), ClubStoreError> {
    sqlx::query(
        r#"
        INSERT INTO club_members (id, club_id, member_id, role, approved, payment_status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(*club_member.id.as_ref())
    .bind(*club_member.club_id.as_ref())
    .bind(*club_member.member_id.as_ref())
    .bind(club_member.role.as_str())
    .bind(club_member.approved)
    .bind(club_member.payment_status)
    .execute(executor)
    .await
    .map_err(map_write_error)?;
    Ok(())
}

#[async_trait::async_trait]
impl ClubStore for PostgresClubStore {
    #[tracing::instrument(name = "Adding club with leader to PostgreSQL", skip_all)]
    async fn add_club(
        &mut self,
        club: &Club,
        leader: &ClubMember,
    ) -> Result<(), ClubStoreError> {
        // Dropping the transaction without commit rolls both inserts back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO clubs (id, name, leader, address_id, point, monthly_fee,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(*club.id.as_ref())
        .bind(club.name.as_ref())
        .bind(*club.leader.as_ref())
        .bind(club.address_id)
        .bind(club.point)
        .bind(club.monthly_fee.value_of())
        .bind(club.created_at)
        .bind(club.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        insert_club_member(&mut *tx, leader).await?;

        tx.commit()
            .await
            .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Retrieving club from PostgreSQL", skip_all)]
    async fn get_club(&self, id: &ClubId) -> Result<Club, ClubStoreError> {
        sqlx::query_as::<_, ClubRow>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE id = $1"
        ))
        .bind(*id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(ClubStoreError::ClubNotFound)?
        .try_into()
    }

    #[tracing::instrument(
        name = "Retrieving club by name from PostgreSQL",
        skip_all
    )]
    async fn get_club_by_name(
        &self,
        name: &ClubName,
    ) -> Result<Club, ClubStoreError> {
        sqlx::query_as::<_, ClubRow>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE name = $1"
        ))
        .bind(name.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(ClubStoreError::ClubNotFound)?
        .try_into()
    }

    #[tracing::instrument(name = "Checking club name in PostgreSQL", skip_all)]
    async fn club_name_exists(
        &self,
        name: &ClubName,
    ) -> Result<bool, ClubStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clubs WHERE name = $1)",
        )
        .bind(name.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Checking club ID in PostgreSQL", skip_all)]
    async fn club_id_exists(
        &self,
        id: &ClubId,
    ) -> Result<bool, ClubStoreError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM clubs WHERE id = $1)",
        )
        .bind(*id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Adding club member to PostgreSQL", skip_all)]
    async fn add_club_member(
        &mut self,
        club_member: &ClubMember,
    ) -> Result<(), ClubStoreError> {
        insert_club_member(&self.pool, club_member).await
    }

    #[tracing::instrument(
        name = "Retrieving club member from PostgreSQL",
        skip_all
    )]
    async fn get_club_member(
        &self,
        id: &ClubMemberId,
    ) -> Result<ClubMember, ClubStoreError> {
        sqlx::query_as::<_, ClubMemberRow>(&format!(
            "SELECT {CLUB_MEMBER_COLUMNS} FROM club_members WHERE id = $1"
        ))
        .bind(*id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?
        .ok_or(ClubStoreError::ClubMemberNotFound)?
        .try_into()
    }

    #[tracing::instrument(name = "Finding club member in PostgreSQL", skip_all)]
    async fn find_club_member(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubMember>, ClubStoreError> {
        sqlx::query_as::<_, ClubMemberRow>(&format!(
            "SELECT {CLUB_MEMBER_COLUMNS} FROM club_members \
             WHERE club_id = $1 AND member_id = $2"
        ))
        .bind(*club_id.as_ref())
        .bind(*member_id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?
        .map(ClubMember::try_from)
        .transpose()
    }

    #[tracing::instrument(name = "Listing club members from PostgreSQL", skip_all)]
    async fn get_club_members(
        &self,
        club_id: &ClubId,
        filter: ClubMemberFilter,
    ) -> Result<Vec<ClubMember>, ClubStoreError> {
        let rows = sqlx::query_as::<_, ClubMemberRow>(&format!(
            "SELECT {CLUB_MEMBER_COLUMNS} FROM club_members \
             WHERE club_id = $1 AND {} ORDER BY id",
            filter_clause(filter)
        ))
        .bind(*club_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        collect_rows(rows)
    }

    #[tracing::instrument(name = "Listing memberships from PostgreSQL", skip_all)]
    async fn get_memberships(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<ClubMember>, ClubStoreError> {
        let rows = sqlx::query_as::<_, ClubMemberRow>(&format!(
            "SELECT {CLUB_MEMBER_COLUMNS} FROM club_members \
             WHERE member_id = $1 ORDER BY id"
        ))
        .bind(*member_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        collect_rows(rows)
    }

    #[tracing::instrument(name = "Approving club member in PostgreSQL", skip_all)]
    async fn set_approved(
        &mut self,
        id: &ClubMemberId,
    ) -> Result<(), ClubStoreError> {
        let result =
            sqlx::query("UPDATE club_members SET approved = TRUE WHERE id = $1")
                .bind(*id.as_ref())
                .execute(&self.pool)
                .await
                .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ClubStoreError::ClubMemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating payment status in PostgreSQL", skip_all)]
    async fn set_payment_status(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        paid: bool,
    ) -> Result<(), ClubStoreError> {
        let result = sqlx::query(
            "UPDATE club_members SET payment_status = $3 \
             WHERE club_id = $1 AND member_id = $2",
        )
        .bind(*club_id.as_ref())
        .bind(*member_id.as_ref())
        .bind(paid)
        .execute(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ClubStoreError::ClubMemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating club role in PostgreSQL", skip_all)]
    async fn set_role(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
    ) -> Result<(), ClubStoreError> {
        let result = sqlx::query(
            "UPDATE club_members SET role = $3 \
             WHERE club_id = $1 AND member_id = $2",
        )
        .bind(*club_id.as_ref())
        .bind(*member_id.as_ref())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(ClubStoreError::ClubMemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting club member from PostgreSQL", skip_all)]
    async fn delete_club_member(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError> {
        let result = sqlx::query(
            "DELETE FROM club_members WHERE club_id = $1 AND member_id = $2",
        )
        .bind(*club_id.as_ref())
        .bind(*member_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(ClubStoreError::ClubMemberNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting all memberships for member", skip_all)]
    async fn delete_memberships(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError> {
        sqlx::query("DELETE FROM club_members WHERE member_id = $1")
            .bind(*member_id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| ClubStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }
}
