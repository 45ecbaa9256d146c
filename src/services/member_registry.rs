use crate::{
    app_state::MemberStoreType,
    domain::{
        LoginId, Member, MemberAPIError, MemberId, MemberPasswordHash,
        MemberStoreError, NewMember, Nickname, Password,
    },
    utils::auth::AuthContext,
};

/// Member accounts: sign-up, credential checks and self-service updates.
#[derive(Clone)]
pub struct MemberRegistry {
    store: MemberStoreType,
}

impl MemberRegistry {
    pub fn new(store: MemberStoreType) -> Self {
        Self { store }
    }

    /// Registers a new member and returns the generated ID.
    ///
    /// The existence checks only give early feedback. A concurrent sign-up
    /// that wins the race is still rejected by the store.
    #[tracing::instrument(name = "Signing up member", skip_all)]
    pub async fn sign_up(
        &self,
        new_member: NewMember,
    ) -> Result<MemberId, MemberAPIError> {
        if self.is_login_id_exist(&new_member.login_id).await? {
            return Err(MemberAPIError::IdDuplicated);
        }
        if self.is_nickname_exist(&new_member.nickname).await? {
            return Err(MemberAPIError::NicknameDuplicated);
        }

        let hash = MemberPasswordHash::from_password(&new_member.password)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;

        let member = Member::new(
            new_member.login_id,
            hash,
            new_member.nickname,
            new_member.position_id,
            new_member.address_id,
        );
        let id = member.id;

        self.store.write().await.add_member(member).await?;

        Ok(id)
    }

    pub async fn is_login_id_exist(
        &self,
        login_id: &LoginId,
    ) -> Result<bool, MemberAPIError> {
        Ok(self.store.read().await.login_id_exists(login_id).await?)
    }

    pub async fn is_nickname_exist(
        &self,
        nickname: &Nickname,
    ) -> Result<bool, MemberAPIError> {
        Ok(self.store.read().await.nickname_exists(nickname).await?)
    }

    pub async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberAPIError> {
        Ok(self.store.read().await.get_member(id).await?)
    }

    /// Returns the member only when the login ID exists and the password
    /// verifies against its stored hash.
    #[tracing::instrument(name = "Checking member credentials", skip_all)]
    pub async fn get_member_by_login_id_and_password(
        &self,
        login_id: &LoginId,
        password: &Password,
    ) -> Result<Option<Member>, MemberAPIError> {
        let member = match self
            .store
            .read()
            .await
            .get_member_by_login_id(login_id)
            .await
        {
            Ok(member) => member,
            Err(MemberStoreError::MemberNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let matches = member
            .hash
            .matches(password)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;

        Ok(matches.then_some(member))
    }

    #[tracing::instrument(name = "Updating nickname", skip_all)]
    pub async fn update_nickname(
        &self,
        auth: &AuthContext,
        nickname: Nickname,
    ) -> Result<(), MemberAPIError> {
        let member = self.get_member(&auth.member_id).await?;
        if member.nickname == nickname {
            return Ok(());
        }
        if self.is_nickname_exist(&nickname).await? {
            return Err(MemberAPIError::NicknameDuplicated);
        }

        self.store
            .write()
            .await
            .update_nickname(&auth.member_id, &nickname)
            .await?;

        Ok(())
    }

    /// Replaces the password after verifying `before`. The new password is
    /// rejected when it verifies against the current hash.
    #[tracing::instrument(name = "Updating password", skip_all)]
    pub async fn update_password(
        &self,
        auth: &AuthContext,
        before: Password,
        after: Password,
    ) -> Result<(), MemberAPIError> {
        let member = self.get_member(&auth.member_id).await?;

        let before_matches = member
            .hash
            .matches(&before)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;
        if !before_matches {
            return Err(MemberAPIError::IncorrectCredentials);
        }

        let after_matches = member
            .hash
            .matches(&after)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;
        if after_matches {
            return Err(MemberAPIError::PasswordSame);
        }

        let hash = MemberPasswordHash::from_password(&after)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;

        self.store
            .write()
            .await
            .update_password(&auth.member_id, &hash)
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Deleting member", skip_all)]
    pub async fn delete(&self, auth: &AuthContext) -> Result<(), MemberAPIError> {
        self.store
            .write()
            .await
            .delete_member(&auth.member_id)
            .await?;
        Ok(())
    }
}
