mod apply;
mod create_club;
mod get_members;
mod lookup;
mod update_member;

pub use apply::apply;
pub use create_club::{create_club, ClubResponse, CreateClubRequest};
pub use get_members::{
    get_club_members, get_not_paid_club_members, get_paid_club_members,
    get_pending_club_members, ClubMemberListResponse,
};
pub use lookup::{club_name_exist, get_club_by_name};
pub use update_member::{
    approve_club_member, change_role, remove_club_member, set_payment_status,
};
