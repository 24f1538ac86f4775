use std::sync::Arc;

use tabled::Tabled;

use crate::cli::PostsArgs;
use crate::client::GraphbookApi;
use crate::error::Result;
use crate::output::{self, truncate};
use crate::types::Post;

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "User")]
    user_id: i64,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: truncate(&post.title, 60),
        }
    }
}

/// The first `limit` posts, or all of them with `--all`.
fn select_posts(posts: &[Post], limit: usize, all: bool) -> &[Post] {
    if all {
        posts
    } else {
        &posts[..posts.len().min(limit)]
    }
}

pub async fn list(api: Arc<dyn GraphbookApi>, args: PostsArgs) -> Result<()> {
    let posts = api.posts().await?;
    let shown = select_posts(&posts, args.limit, args.all);

    if shown.is_empty() {
        output::print_message("No posts to show.");
        return Ok(());
    }

    output::print_table(shown, |p| PostRow::from(p), |p| format!("{}\t{}", p.id, p.title));

    Ok(())
}
