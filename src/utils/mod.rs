pub mod app_error;
pub mod authentification;
pub mod feed;
pub mod image;
pub mod pagination;
pub mod post;
pub mod register;
pub mod timeline_cache;
