use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{BannedTokenStore, ClubStore, MemberStore},
    services::{ClubMembership, ClubRegistry, MemberRegistry},
};

pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type ClubStoreType = Arc<RwLock<dyn ClubStore + Send + Sync>>;
pub type BannedTokenStoreType = Arc<RwLock<dyn BannedTokenStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub member_registry: MemberRegistry,
    pub club_registry: ClubRegistry,
    pub club_membership: ClubMembership,
    pub banned_token_store: BannedTokenStoreType,
}

impl AppState {
    /// Clubs and their membership rows share one store so that a club and
    /// its leader are written together.
    pub fn new(
        member_store: MemberStoreType,
        club_store: ClubStoreType,
        banned_token_store: BannedTokenStoreType,
    ) -> Self {
        Self {
            member_registry: MemberRegistry::new(member_store),
            club_registry: ClubRegistry::new(club_store.clone()),
            club_membership: ClubMembership::new(club_store),
            banned_token_store,
        }
    }
}
