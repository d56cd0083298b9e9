pub mod account;
pub mod comment;
pub mod group;
pub mod post;
