mod club;
mod club_member;
mod club_name;
mod data_stores;
mod error;
mod login_id;
mod member;
mod member_id;
mod nickname;
mod password;
mod password_hash;

pub use club::*;
pub use club_member::*;
pub use club_name::*;
pub use data_stores::*;
pub use error::*;
pub use login_id::*;
pub use member::*;
pub use member_id::*;
pub use nickname::*;
pub use password::*;
pub use password_hash::*;
