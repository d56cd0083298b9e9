pub mod comment;
pub mod login_user;
pub mod pages;
pub mod post;
pub mod register_user;
