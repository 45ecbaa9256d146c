use crate::{
    app_state::ClubStoreType,
    domain::{
        ClubAPIError, ClubId, ClubMember, ClubMemberFilter, ClubMemberId,
        ClubRole, MemberId, ValidationError,
    },
};

/// Membership rows and their transitions.
///
/// ```text
///  [no row] --add--------> pending member
///  [no row] --add_leader-> approved leader
///  pending  --approve----> approved member
///  approved --change_role-> approved member/staff
///  any non-leader row --delete_club_member--> [no row]
/// ```
///
/// Authorization is the caller's job; see [`crate::utils::club`].
#[derive(Clone)]
pub struct ClubMembership {
    store: ClubStoreType,
}

impl ClubMembership {
    pub fn new(store: ClubStoreType) -> Self {
        Self { store }
    }

    /// Inserts the approved leader row of a newly created club. The store
    /// refuses a second leader for the same club.
    #[tracing::instrument(name = "Adding club leader", skip_all)]
    pub async fn add_leader(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<ClubMember, ClubAPIError> {
        let row = ClubMember::leader(*club_id, *member_id);
        self.store.write().await.add_club_member(&row).await?;
        Ok(row)
    }

    /// Files a pending application. Any existing row for the pair, approved
    /// or not, makes this a duplicate.
    #[tracing::instrument(name = "Applying to club", skip_all)]
    pub async fn add(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<ClubMember, ClubAPIError> {
        if self.find(club_id, member_id).await?.is_some() {
            return Err(ClubAPIError::ClubMemberDuplicated);
        }

        let row = ClubMember::applicant(*club_id, *member_id);
        self.store.write().await.add_club_member(&row).await?;
        Ok(row)
    }

    pub async fn is_club_leader(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<bool, ClubAPIError> {
        Ok(self
            .find(club_id, member_id)
            .await?
            .is_some_and(|row| row.is_leader()))
    }

    pub async fn is_club_leader_or_staff(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<bool, ClubAPIError> {
        Ok(self
            .find(club_id, member_id)
            .await?
            .is_some_and(|row| row.approved && row.is_leader_or_staff()))
    }

    /// True for approved rows of any role.
    pub async fn is_club_member(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<bool, ClubAPIError> {
        Ok(self
            .find(club_id, member_id)
            .await?
            .is_some_and(|row| row.approved))
    }

    /// True while an application is waiting for approval.
    pub async fn is_applied(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<bool, ClubAPIError> {
        Ok(self
            .find(club_id, member_id)
            .await?
            .is_some_and(|row| row.is_pending()))
    }

    pub async fn get_club_member_by_id(
        &self,
        id: &ClubMemberId,
    ) -> Result<ClubMember, ClubAPIError> {
        Ok(self.store.read().await.get_club_member(id).await?)
    }

    pub async fn get_club_member_by_club_id_and_member_id(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<ClubMember, ClubAPIError> {
        self.find(club_id, member_id)
            .await?
            .ok_or(ClubAPIError::ClubMemberNotExist)
    }

    /// Approved members of every role. An empty roster is reported as
    /// [`ClubAPIError::ClubMemberNotExist`].
    pub async fn get_club_members(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<ClubMember>, ClubAPIError> {
        non_empty(self.list(club_id, ClubMemberFilter::Approved).await?)
    }

    /// Pending applications. An empty list is reported as
    /// [`ClubAPIError::ClubMemberNotExist`].
    pub async fn get_not_accepted_club_members(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<ClubMember>, ClubAPIError> {
        non_empty(self.list(club_id, ClubMemberFilter::Pending).await?)
    }

    pub async fn get_not_paid_club_members(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<ClubMember>, ClubAPIError> {
        self.list(club_id, ClubMemberFilter::NotPaid).await
    }

    pub async fn get_paid_club_members(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<ClubMember>, ClubAPIError> {
        self.list(club_id, ClubMemberFilter::Paid).await
    }

    /// Marks the row approved. Approving an approved row is a no-op.
    #[tracing::instrument(name = "Approving club member", skip_all)]
    pub async fn approve(&self, id: &ClubMemberId) -> Result<(), ClubAPIError> {
        self.store.write().await.set_approved(id).await?;
        Ok(())
    }

    pub async fn approve_club_member(
        &self,
        club_member_id: &ClubMemberId,
    ) -> Result<(), ClubAPIError> {
        self.approve(club_member_id).await
    }

    /// Removes the row. The leader row stays so the club keeps its leader.
    #[tracing::instrument(name = "Removing club member", skip_all)]
    pub async fn delete_club_member(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubAPIError> {
        let mut store = self.store.write().await;

        let row = store
            .find_club_member(club_id, member_id)
            .await?
            .ok_or(ClubAPIError::ClubMemberNotExist)?;
        if row.is_leader() {
            return Err(ClubAPIError::LeaderCannotLeave);
        }

        store.delete_club_member(club_id, member_id).await?;
        Ok(())
    }

    pub async fn set_payment_status_true(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubAPIError> {
        self.set_payment_status(club_id, member_id, true).await
    }

    pub async fn set_payment_status_false(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubAPIError> {
        self.set_payment_status(club_id, member_id, false).await
    }

    /// Promotes an approved member to staff or demotes staff to member.
    /// Leadership is never assigned or taken away here.
    #[tracing::instrument(name = "Changing club role", skip_all)]
    pub async fn change_role(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
    ) -> Result<(), ClubAPIError> {
        if role == ClubRole::Leader {
            return Err(ValidationError::new(String::from(
                "Only STAFF or MEMBER can be assigned",
            ))
            .into());
        }

        let mut store = self.store.write().await;

        let row = store
            .find_club_member(club_id, member_id)
            .await?
            .ok_or(ClubAPIError::ClubMemberNotExist)?;
        if row.is_leader() {
            return Err(ClubAPIError::NotPermitted(
                "the club leader's role cannot be changed",
            ));
        }
        if row.is_pending() {
            return Err(ClubAPIError::ClubMemberNotApproved);
        }

        store.set_role(club_id, member_id, role).await?;
        Ok(())
    }

    /// Drops every membership of a member who is about to delete their
    /// account. Refused while the member still leads a club.
    #[tracing::instrument(name = "Releasing memberships", skip_all)]
    pub async fn release_memberships(
        &self,
        member_id: &MemberId,
    ) -> Result<(), ClubAPIError> {
        let mut store = self.store.write().await;

        let memberships = store.get_memberships(member_id).await?;
        if memberships.iter().any(ClubMember::is_leader) {
            return Err(ClubAPIError::LeaderCannotLeave);
        }

        store.delete_memberships(member_id).await?;
        tracing::debug!("released {} memberships", memberships.len());
        Ok(())
    }

    async fn find(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubMember>, ClubAPIError> {
        Ok(self
            .store
            .read()
            .await
            .find_club_member(club_id, member_id)
            .await?)
    }

    async fn list(
        &self,
        club_id: &ClubId,
        filter: ClubMemberFilter,
    ) -> Result<Vec<ClubMember>, ClubAPIError> {
        Ok(self
            .store
            .read()
            .await
            .get_club_members(club_id, filter)
            .await?)
    }

    async fn set_payment_status(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
        paid: bool,
    ) -> Result<(), ClubAPIError> {
        self.store
            .write()
            .await
            .set_payment_status(club_id, member_id, paid)
            .await?;
        Ok(())
    }
}

fn non_empty(rows: Vec<ClubMember>) -> Result<Vec<ClubMember>, ClubAPIError> {
    match rows.is_empty() {
        true => Err(ClubAPIError::ClubMemberNotExist),
        false => Ok(rows),
    }
}
