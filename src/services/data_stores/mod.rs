mod hashmap_club_store;
mod hashmap_member_store;
mod hashset_banned_token_store;
mod postgres_club_store;
mod postgres_member_store;
mod redis_banned_token_store;

pub use hashmap_club_store::*;
pub use hashmap_member_store::*;
pub use hashset_banned_token_store::*;
pub use postgres_club_store::*;
pub use postgres_member_store::*;
pub use redis_banned_token_store::*;
