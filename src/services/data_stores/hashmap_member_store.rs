use chrono::Utc;
use std::collections::HashMap;

use crate::domain::{
    LoginId, Member, MemberId, MemberPasswordHash, MemberStore,
    MemberStoreError, Nickname,
};

#[derive(Default)]
pub struct HashmapMemberStore {
    members: HashMap<MemberId, Member>,
}

impl HashmapMemberStore {
    fn get_member_mut(
        &mut self,
        id: &MemberId,
    ) -> Result<&mut Member, MemberStoreError> {
        self.members.get_mut(id).ok_or(MemberStoreError::MemberNotFound)
    }
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        if self.login_id_exists(&member.login_id).await? {
            return Err(MemberStoreError::LoginIdExists);
        }
        if self.nickname_exists(&member.nickname).await? {
            return Err(MemberStoreError::NicknameExists);
        }

        self.members.insert(member.id, member);
        Ok(())
    }

    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .get(id)
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn get_member_by_login_id(
        &self,
        login_id: &LoginId,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .values()
            .find(|member| &member.login_id == login_id)
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn login_id_exists(
        &self,
        login_id: &LoginId,
    ) -> Result<bool, MemberStoreError> {
        Ok(self
            .members
            .values()
            .any(|member| &member.login_id == login_id))
    }

    async fn nickname_exists(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, MemberStoreError> {
        Ok(self
            .members
            .values()
            .any(|member| &member.nickname == nickname))
    }

    async fn update_nickname(
        &mut self,
        id: &MemberId,
        nickname: &Nickname,
    ) -> Result<(), MemberStoreError> {
        let taken = self
            .members
            .values()
            .any(|member| &member.nickname == nickname && &member.id != id);
        if taken {
            return Err(MemberStoreError::NicknameExists);
        }

        let member = self.get_member_mut(id)?;
        member.nickname = nickname.clone();
        member.updated_at = Utc::now();
        Ok(())
    }

    async fn update_password(
        &mut self,
        id: &MemberId,
        hash: &MemberPasswordHash,
    ) -> Result<(), MemberStoreError> {
        let member = self.get_member_mut(id)?;
        member.hash = hash.clone();
        member.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        match self.members.remove(id) {
            Some(_) => Ok(()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }
}
