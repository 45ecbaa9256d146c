mod clubs;
mod helpers;
mod members;
