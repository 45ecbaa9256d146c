mod club_membership;
mod club_registry;
pub mod data_stores;
mod member_registry;

pub use club_membership::*;
pub use club_registry::*;
pub use member_registry::*;
