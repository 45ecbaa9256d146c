use crate::{
    app_state::ClubStoreType,
    domain::{
        Club, ClubAPIError, ClubId, ClubMember, ClubName, MemberId, NewClub,
    },
};

#[derive(Clone)]
pub struct ClubRegistry {
    store: ClubStoreType,
}

impl ClubRegistry {
    pub fn new(store: ClubStoreType) -> Self {
        Self { store }
    }

    /// Creates the club with `leader` as its sole leader. The club and the
    /// leader's membership row are stored together or not at all.
    #[tracing::instrument(name = "Creating club", skip_all)]
    pub async fn insert(
        &self,
        leader: &MemberId,
        new_club: NewClub,
    ) -> Result<Club, ClubAPIError> {
        if self.is_name_exist(&new_club.name).await? {
            return Err(ClubAPIError::ClubNameDuplicated);
        }

        let club = Club::new(new_club, *leader);
        let leader_row = ClubMember::leader(club.id, *leader);

        self.store
            .write()
            .await
            .add_club(&club, &leader_row)
            .await?;

        Ok(club)
    }

    pub async fn get_club(&self, id: &ClubId) -> Result<Club, ClubAPIError> {
        Ok(self.store.read().await.get_club(id).await?)
    }

    pub async fn get_club_by_name(
        &self,
        name: &ClubName,
    ) -> Result<Club, ClubAPIError> {
        Ok(self.store.read().await.get_club_by_name(name).await?)
    }

    pub async fn is_name_exist(
        &self,
        name: &ClubName,
    ) -> Result<bool, ClubAPIError> {
        Ok(self.store.read().await.club_name_exists(name).await?)
    }

    pub async fn is_id_exist(&self, id: &ClubId) -> Result<bool, ClubAPIError> {
        Ok(self.store.read().await.club_id_exists(id).await?)
    }
}
