pub mod clubs;
pub mod members;
