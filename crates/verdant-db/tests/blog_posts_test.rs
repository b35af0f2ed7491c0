//! Tests for the `blog_posts` query module, including the degraded path
//! when the table is missing.

use sqlx::Executor;

use verdant_db::queries::blog_posts::{self, NewBlogPost};
use verdant_test_utils::{create_test_db, drop_test_db};

fn post(title: &str, tags: Option<&str>, published: bool) -> NewBlogPost {
    NewBlogPost {
        title: title.to_string(),
        content: format!("{title} content"),
        tags: tags.map(str::to_string),
        published,
    }
}

#[tokio::test]
async fn list_published_excludes_drafts() {
    let (pool, db_name) = create_test_db().await;

    blog_posts::insert_blog_post(&pool, &post("Spring pruning", Some("pruning,spring"), true))
        .await
        .expect("insert");
    blog_posts::insert_blog_post(&pool, &post("Draft notes", None, false))
        .await
        .expect("insert");

    let published = blog_posts::list_published(&pool).await.expect("list");
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title, "Spring pruning");

    assert_eq!(blog_posts::count_published(&pool).await.expect("count"), 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_published_hides_drafts() {
    let (pool, db_name) = create_test_db().await;

    let draft = blog_posts::insert_blog_post(&pool, &post("Draft", None, false))
        .await
        .expect("insert");

    let fetched = blog_posts::get_published(&pool, draft.id).await.expect("get");
    assert!(fetched.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn list_published_degrades_when_table_missing() {
    let (pool, db_name) = create_test_db().await;

    // Simulate a database that never ran the blog migration.
    pool.execute("DROP TABLE blog_posts")
        .await
        .expect("drop table");

    let posts = blog_posts::list_published(&pool)
        .await
        .expect("missing table should degrade, not error");
    assert!(posts.is_empty());

    pool.close().await;
    drop_test_db(&db_name).await;
}
