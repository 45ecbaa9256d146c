use chrono::{DateTime, Utc};

use super::{LoginId, MemberId, MemberPasswordHash, Nickname, Password};

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub login_id: LoginId,
    pub hash: MemberPasswordHash,
    pub nickname: Nickname,
    pub point: i32,
    pub position_id: Option<i32>,
    pub address_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        login_id: LoginId,
        hash: MemberPasswordHash,
        nickname: Nickname,
        position_id: Option<i32>,
        address_id: Option<i32>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MemberId::default(),
            login_id,
            hash,
            nickname,
            point: 0,
            position_id,
            address_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated sign-up input. The password is hashed by the registry before a
/// [`Member`] is built from it.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub login_id: LoginId,
    pub password: Password,
    pub nickname: Nickname,
    pub position_id: Option<i32>,
    pub address_id: Option<i32>,
}
