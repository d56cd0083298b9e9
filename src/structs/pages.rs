use serde::Serialize;

use crate::{
    models::{account::PublicAccount, comment::PublicComment, group::Group, post::PublicPost},
    utils::pagination::Page,
};

#[derive(Serialize)]
pub struct IndexPage {
    pub page_obj: Page<PublicPost>,
}

#[derive(Serialize)]
pub struct GroupPage {
    pub group: Group,
    pub page_obj: Page<PublicPost>,
}

#[derive(Serialize)]
pub struct ProfilePage {
    pub author: PublicAccount,
    pub following: bool,
    pub page_obj: Page<PublicPost>,
}

#[derive(Serialize)]
pub struct PostDetailPage {
    pub current_post: PublicPost,
    pub comments: Vec<PublicComment>,
}

#[derive(Serialize)]
pub struct FollowPage {
    pub page_obj: Page<PublicPost>,
}
