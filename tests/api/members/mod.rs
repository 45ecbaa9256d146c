mod delete;
mod exist;
mod login;
mod logout;
