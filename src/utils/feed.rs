use tracing::debug;

use super::app_error::AppError;
use crate::{models::post::PublicPost, store::Store};

/// Posts of every author `viewer_id` follows, newest first.
///
/// Fan-out on read: one query for the follow edges, then one per author. The
/// queries are not run in a transaction, so a post created meanwhile may or may
/// not show up.
pub async fn followed_feed(store: &Store, viewer_id: i64) -> Result<Vec<PublicPost>, AppError> {
    let author_ids = store.followed_author_ids(viewer_id).await?;

    let mut streams = Vec::with_capacity(author_ids.len());
    for author_id in author_ids {
        streams.push(store.posts_by_author(author_id).await?);
    }

    debug!(
        "Merging {} author streams for viewer {viewer_id}",
        streams.len()
    );

    Ok(merge_author_streams(streams))
}

/// Concatenates the streams then sorts by `pub_date`, newest first. The sort is
/// stable: equal dates keep their concatenation order.
pub fn merge_author_streams(streams: Vec<Vec<PublicPost>>) -> Vec<PublicPost> {
    let mut posts: Vec<PublicPost> = streams.into_iter().flatten().collect();
    posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    posts
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime};

    use super::*;
    use crate::models::{
        account::NewAccount,
        post::{NewPost, PostAuthor},
    };

    fn post(id: i64, author_id: i64, pub_date: OffsetDateTime) -> PublicPost {
        PublicPost {
            id,
            text: format!("post {id}"),
            pub_date,
            author: PostAuthor {
                id: author_id,
                username: format!("user{author_id}"),
            },
            group: None,
            image: None,
        }
    }

    #[test]
    fn merge_interleaves_by_date() {
        let t3 = OffsetDateTime::now_utc();
        let t2 = t3 + Duration::minutes(1);
        let t1 = t2 + Duration::minutes(1);

        let merged = merge_author_streams(vec![
            vec![post(1, 1, t1), post(3, 1, t3)],
            vec![post(2, 2, t2)],
        ]);

        let ids: Vec<_> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn merge_is_stable_on_ties() {
        let t = OffsetDateTime::now_utc();
        let merged = merge_author_streams(vec![vec![post(7, 1, t)], vec![post(4, 2, t)]]);
        let ids: Vec<_> = merged.iter().map(|p| p.id).collect();
        assert_eq!(ids, [7, 4]);
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge_author_streams(Vec::new()).is_empty());
    }

    async fn account(store: &Store, username: &str) -> i64 {
        store
            .create_account(NewAccount {
                username: username.to_string(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                password: String::new(),
                token: username.to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn followed_feed_merges_followed_authors_only() {
        let store = Store::in_memory().await.unwrap();
        let viewer = account(&store, "viewer").await;
        let a = account(&store, "a").await;
        let b = account(&store, "b").await;
        let stranger = account(&store, "stranger").await;

        let t3 = OffsetDateTime::now_utc() - Duration::hours(1);
        let t2 = t3 + Duration::minutes(10);
        let t1 = t2 + Duration::minutes(10);

        for (author, text, at) in [(a, "t1", t1), (a, "t3", t3), (b, "t2", t2), (stranger, "x", t1)] {
            let mut new_post = NewPost::new(author, text);
            new_post.pub_date = at;
            store.create_post(new_post).await.unwrap();
        }

        assert!(followed_feed(&store, viewer).await.unwrap().is_empty());

        store.follow(viewer, a).await.unwrap();
        store.follow(viewer, b).await.unwrap();

        let feed = followed_feed(&store, viewer).await.unwrap();
        let texts: Vec<_> = feed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["t1", "t2", "t3"]);
    }
}
