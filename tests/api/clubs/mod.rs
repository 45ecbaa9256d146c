mod membership;
mod permissions;
