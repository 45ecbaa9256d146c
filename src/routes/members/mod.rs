mod delete_member;
mod exist;
mod login;
mod logout;
mod signup;
mod update_nickname;
mod update_password;

pub use delete_member::*;
pub use exist::*;
pub use login::*;
pub use logout::*;
pub use signup::*;
pub use update_nickname::*;
pub use update_password::*;
