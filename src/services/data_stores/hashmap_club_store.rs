use std::collections::HashMap;

use crate::domain::{
    Club, ClubId, ClubMember, ClubMemberFilter, ClubMemberId, ClubName,
    ClubRole, ClubStore, ClubStoreError, MemberId,
};

#[derive(Default)]
pub struct HashmapClubStore {
    clubs: HashMap<ClubId, Club>,
    club_members: HashMap<ClubMemberId, ClubMember>,
}

impl HashmapClubStore {
    fn find_club_member_mut(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<&mut ClubMember, ClubStoreError> {
        self.club_members
            .values_mut()
            .find(|row| &row.club_id == club_id && &row.member_id == member_id)
            .ok_or(ClubStoreError::ClubMemberNotFound)
    }

    // Ordered by row ID, matching the PostgreSQL store
    fn sorted_rows(
        &self,
        predicate: impl Fn(&ClubMember) -> bool,
    ) -> Vec<ClubMember> {
        let mut rows: Vec<ClubMember> = self
            .club_members
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect();
        rows.sort_by_key(|row| *row.id.as_ref());
        rows
    }

    fn pair_exists(&self, club_id: &ClubId, member_id: &MemberId) -> bool {
        self.club_members
            .values()
            .any(|row| &row.club_id == club_id && &row.member_id == member_id)
    }
}

#[async_trait::async_trait]
impl ClubStore for HashmapClubStore {
    async fn add_club(
        &mut self,
        club: &Club,
        leader: &ClubMember,
    ) -> Result<(), ClubStoreError> {
        if self.club_name_exists(&club.name).await? {
            return Err(ClubStoreError::ClubNameExists);
        }
        if self.club_members.contains_key(&leader.id) {
            return Err(ClubStoreError::ClubMemberExists);
        }

        self.clubs.insert(club.id, club.clone());
        self.club_members.insert(leader.id, leader.clone());
        Ok(())
    }

    async fn get_club(&self, id: &ClubId) -> Result<Club, ClubStoreError> {
        self.clubs
            .get(id)
            .cloned()
            .ok_or(ClubStoreError::ClubNotFound)
    }

    async fn get_club_by_name(
        &self,
        name: &ClubName,
    ) -> Result<Club, ClubStoreError> {
        self.clubs
            .values()
            .find(|club| &club.name == name)
            .cloned()
            .ok_or(ClubStoreError::ClubNotFound)
    }

    async fn club_name_exists(
        &self,
        name: &ClubName,
    ) -> Result<bool, ClubStoreError> {
        Ok(self.clubs.values().any(|club| &club.name == name))
    }

    async fn club_id_exists(
        &self,
        id: &ClubId,
    ) -> Result<bool, ClubStoreError> {
        Ok(self.clubs.contains_key(id))
    }

    async fn add_club_member(
        &mut self,
        club_member: &ClubMember,
    ) -> Result<(), ClubStoreError> {
        if !self.clubs.contains_key(&club_member.club_id) {
            return Err(ClubStoreError::ClubNotFound);
        }
        if self.pair_exists(&club_member.club_id, &club_member.member_id)
            || self.club_members.contains_key(&club_member.id)
        {
            return Err(ClubStoreError::ClubMemberExists);
        }
        // One leader per club
        if club_member.is_leader()
            && self.club_members.values().any(|row| {
                row.club_id == club_member.club_id && row.is_leader()
            })
        {
            return Err(ClubStoreError::ClubMemberExists);
        }

        self.club_members.insert(club_member.id, club_member.clone());
        Ok(())
    }

    async fn get_club_member(
        &self,
        id: &ClubMemberId,
    ) -> Result<ClubMember, ClubStoreError> {
        self.club_members
            .get(id)
            .cloned()
            .ok_or(ClubStoreError::ClubMemberNotFound)
    }

    async fn find_club_member(
        &self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<Option<ClubMember>, ClubStoreError> {
        Ok(self
            .club_members
            .values()
            .find(|row| &row.club_id == club_id && &row.member_id == member_id)
            .cloned())
    }

    async fn get_club_members(
        &self,
        club_id: &ClubId,
        filter: ClubMemberFilter,
    ) -> Result<Vec<ClubMember>, ClubStoreError> {
        Ok(self.sorted_rows(|row| {
            &row.club_id == club_id && row.matches(filter)
        }))
    }

    async fn get_memberships(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<ClubMember>, ClubStoreError> {
        Ok(self.sorted_rows(|row| &row.member_id == member_id))
    }

    async fn set_approved(
        &mut self,
        id: &ClubMemberId,
    ) -> Result<(), ClubStoreError> {
        let row = self
            .club_members
            .get_mut(id)
            .ok_or(ClubStoreError::ClubMemberNotFound)?;
        row.approved = true;
        Ok(())
    }

    async fn set_payment_status(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        paid: bool,
    ) -> Result<(), ClubStoreError> {
        self.find_club_member_mut(club_id, member_id)?.payment_status = paid;
        Ok(())
    }

    async fn set_role(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
        role: ClubRole,
    ) -> Result<(), ClubStoreError> {
        self.find_club_member_mut(club_id, member_id)?.role = role;
        Ok(())
    }

    async fn delete_club_member(
        &mut self,
        club_id: &ClubId,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError> {
        let id = self.find_club_member_mut(club_id, member_id)?.id;
        self.club_members.remove(&id);
        Ok(())
    }

    async fn delete_memberships(
        &mut self,
        member_id: &MemberId,
    ) -> Result<(), ClubStoreError> {
        self.club_members.retain(|_, row| &row.member_id != member_id);
        Ok(())
    }
}
