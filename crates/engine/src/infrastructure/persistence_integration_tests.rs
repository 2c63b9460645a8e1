use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;

use atelier_domain::{Comment, ExploreSort, Image, ImageId, UserId};

use crate::infrastructure::persistence::{connect, ensure_schema, SqliteRepositories};
use crate::infrastructure::ports::{CommentRepo, ImageRepo, UserRepo};

async fn open_store(temp_dir: &tempfile::TempDir) -> (SqlitePool, SqliteRepositories) {
    let db_path = temp_dir.path().join("atelier.db");
    let pool = connect(&db_path.to_string_lossy())
        .await
        .expect("connect");
    ensure_schema(&pool).await.expect("schema");
    let repos = SqliteRepositories::new(pool.clone());
    (pool, repos)
}

async fn seed_user(pool: &SqlitePool, id: &str, name: &str, email: &str) {
    sqlx::query(r#"INSERT INTO "User" (id, name, email) VALUES (?, ?, ?)"#)
        .bind(id)
        .bind(name)
        .bind(email)
        .execute(pool)
        .await
        .expect("seed user");
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, hour, minute, 0).unwrap()
}

fn test_image(user: &str, prompt: &str, created_at: DateTime<Utc>) -> Image {
    Image::new(
        UserId::from(user),
        format!("https://cdn.example/{prompt}.png"),
        prompt,
        None,
        created_at,
    )
}

#[tokio::test]
async fn stored_image_reads_back_with_owner_name() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (pool, repos) = open_store(&temp_dir).await;
    seed_user(&pool, "u1", "Ada", "ada@example.com").await;

    let image = Image::new(
        UserId::from("u1"),
        "https://cdn.example/fox.png",
        "a fox",
        Some("a red fox in morning light".to_string()),
        at(9, 0),
    );
    repos.images.insert(&image).await.expect("insert");

    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");

    assert_eq!(record.id, image.id());
    assert_eq!(record.user_id, UserId::from("u1"));
    assert_eq!(record.image_url, "https://cdn.example/fox.png");
    assert_eq!(record.prompt, "a fox");
    assert_eq!(
        record.refined_prompt.as_deref(),
        Some("a red fox in morning light")
    );
    assert_eq!(record.created_at, at(9, 0));
    assert_eq!(record.likes, 0);
    assert_eq!(record.user_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn owner_name_is_absent_for_unknown_owner() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let image = test_image("ghost", "dunes", at(9, 0));
    repos.images.insert(&image).await.expect("insert");

    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.user_name, None);
}

#[tokio::test]
async fn like_counter_tracks_like_rows() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let image = test_image("u1", "lake", at(9, 0));
    repos.images.insert(&image).await.expect("insert");

    assert!(repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("like u2"));
    assert!(repos
        .images
        .add_like(image.id(), &UserId::from("u3"))
        .await
        .expect("like u3"));

    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.likes, 2);

    // Second like from the same user is a no-op.
    assert!(!repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("duplicate like"));
    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.likes, 2);

    assert!(repos
        .images
        .remove_like(image.id(), &UserId::from("u2"))
        .await
        .expect("unlike u2"));
    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.likes, 1);

    // Unlike without a like is a no-op too.
    assert!(!repos
        .images
        .remove_like(image.id(), &UserId::from("u2"))
        .await
        .expect("double unlike"));
    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.likes, 1);
}

#[tokio::test]
async fn like_on_missing_image_reports_not_found() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let err = repos
        .images
        .add_like(ImageId::new(), &UserId::from("u1"))
        .await
        .expect_err("no image");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unlike_clamps_a_drifted_counter_at_zero() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (pool, repos) = open_store(&temp_dir).await;

    let image = test_image("u1", "storm", at(9, 0));
    repos.images.insert(&image).await.expect("insert");
    assert!(repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("like"));

    // Simulate counter drift from a legacy writer.
    sqlx::query(r#"UPDATE "Image" SET likes = 0 WHERE id = ?"#)
        .bind(image.id().to_string())
        .execute(&pool)
        .await
        .expect("drift counter");

    assert!(repos
        .images
        .remove_like(image.id(), &UserId::from("u2"))
        .await
        .expect("unlike"));

    let record = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(record.likes, 0);
}

#[tokio::test]
async fn delete_cascades_likes_and_comments() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let image = test_image("u1", "canyon", at(9, 0));
    repos.images.insert(&image).await.expect("insert");
    assert!(repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("like"));
    let comment = Comment::new(image.id(), UserId::from("u2"), "Brin", "stunning", at(9, 5));
    repos.comments.insert(&comment).await.expect("comment");

    assert!(repos
        .images
        .delete_owned(image.id(), &UserId::from("u1"))
        .await
        .expect("delete"));

    assert!(repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .is_none());
    assert!(repos
        .images
        .liked_image_ids(&UserId::from("u2"))
        .await
        .expect("liked ids")
        .is_empty());
    assert!(repos
        .comments
        .list_for_image(image.id())
        .await
        .expect("comments")
        .is_empty());
}

#[tokio::test]
async fn delete_requires_ownership() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let image = test_image("u1", "pier", at(9, 0));
    repos.images.insert(&image).await.expect("insert");

    // Foreign user and missing image both come back false.
    assert!(!repos
        .images
        .delete_owned(image.id(), &UserId::from("u2"))
        .await
        .expect("foreign delete"));
    assert!(!repos
        .images
        .delete_owned(ImageId::new(), &UserId::from("u1"))
        .await
        .expect("missing delete"));

    assert!(repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .is_some());
}

#[tokio::test]
async fn user_images_come_back_newest_first() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let older = test_image("u1", "first", at(9, 0));
    let newer = test_image("u1", "second", at(10, 0));
    let foreign = test_image("u2", "other", at(11, 0));
    for image in [&older, &newer, &foreign] {
        repos.images.insert(image).await.expect("insert");
    }

    let records = repos
        .images
        .list_for_user(&UserId::from("u1"))
        .await
        .expect("list");

    let ids: Vec<_> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
}

#[tokio::test]
async fn explore_sorts_by_likes_with_recency_tiebreak() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let quiet = test_image("u1", "quiet", at(9, 0));
    let popular = test_image("u1", "popular", at(10, 0));
    let rising = test_image("u1", "rising", at(11, 0));
    for image in [&quiet, &popular, &rising] {
        repos.images.insert(image).await.expect("insert");
    }
    for liker in ["a", "b"] {
        assert!(repos
            .images
            .add_like(popular.id(), &UserId::from(liker))
            .await
            .expect("like popular"));
    }
    assert!(repos
        .images
        .add_like(rising.id(), &UserId::from("a"))
        .await
        .expect("like rising"));

    let by_likes = repos
        .images
        .list_explore(10, 0, ExploreSort::MostLiked)
        .await
        .expect("explore likes");
    let ids: Vec<_> = by_likes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![popular.id(), rising.id(), quiet.id()]);

    let newest = repos
        .images
        .list_explore(10, 0, ExploreSort::Newest)
        .await
        .expect("explore newest");
    let ids: Vec<_> = newest.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![rising.id(), popular.id(), quiet.id()]);

    // Equal counters fall back to recency.
    let tied = repos
        .images
        .list_explore(2, 0, ExploreSort::MostLiked)
        .await
        .expect("explore page");
    assert_eq!(tied.len(), 2);

    let paged = repos
        .images
        .list_explore(2, 1, ExploreSort::Newest)
        .await
        .expect("explore offset");
    let ids: Vec<_> = paged.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![popular.id(), quiet.id()]);
}

#[tokio::test]
async fn liked_image_ids_cover_all_likes_of_the_user() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let first = test_image("u1", "one", at(9, 0));
    let second = test_image("u1", "two", at(10, 0));
    for image in [&first, &second] {
        repos.images.insert(image).await.expect("insert");
    }
    for image in [&first, &second] {
        assert!(repos
            .images
            .add_like(image.id(), &UserId::from("u2"))
            .await
            .expect("like"));
    }

    let mut liked = repos
        .images
        .liked_image_ids(&UserId::from("u2"))
        .await
        .expect("liked ids");
    liked.sort_by_key(|id| id.to_string());
    let mut expected = vec![first.id(), second.id()];
    expected.sort_by_key(|id| id.to_string());
    assert_eq!(liked, expected);
}

#[tokio::test]
async fn comments_come_back_oldest_first_and_round_trip() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (_pool, repos) = open_store(&temp_dir).await;

    let image = test_image("u1", "harbor", at(9, 0));
    repos.images.insert(&image).await.expect("insert");

    let later = Comment::new(image.id(), UserId::from("u3"), "Cleo", "second", at(10, 0));
    let earlier = Comment::new(image.id(), UserId::from("u2"), "Brin", "first", at(9, 30));

    let stored = repos.comments.insert(&later).await.expect("insert later");
    assert_eq!(stored.id, later.id);
    assert_eq!(stored.text, "second");
    assert_eq!(stored.created_at, at(10, 0));
    repos
        .comments
        .insert(&earlier)
        .await
        .expect("insert earlier");

    let comments = repos
        .comments
        .list_for_image(image.id())
        .await
        .expect("list");
    let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn image_lifecycle_from_save_to_delete() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (pool, repos) = open_store(&temp_dir).await;
    seed_user(&pool, "u1", "Ada", "ada@example.com").await;

    let image = Image::new(
        UserId::from("u1"),
        "https://cdn.example/cat.png",
        "a cat",
        None,
        at(9, 0),
    );
    repos.images.insert(&image).await.expect("insert");

    let saved = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(saved.user_id, UserId::from("u1"));
    assert_eq!(saved.prompt, "a cat");
    assert_eq!(saved.likes, 0);

    assert!(repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("like"));
    assert!(!repos
        .images
        .add_like(image.id(), &UserId::from("u2"))
        .await
        .expect("duplicate like"));
    let liked = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(liked.likes, 1);

    assert!(repos
        .images
        .remove_like(image.id(), &UserId::from("u2"))
        .await
        .expect("unlike"));
    let unliked = repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(unliked.likes, 0);

    assert!(repos
        .images
        .delete_owned(image.id(), &UserId::from("u1"))
        .await
        .expect("delete"));
    assert!(repos
        .images
        .get_record(image.id())
        .await
        .expect("get")
        .is_none());
}

#[tokio::test]
async fn email_lookup_is_exact_and_user_get_round_trips() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let (pool, repos) = open_store(&temp_dir).await;
    seed_user(&pool, "u1", "Ada", "ada@example.com").await;

    let found = repos
        .users
        .find_id_by_email("ada@example.com")
        .await
        .expect("lookup");
    assert_eq!(found, Some(UserId::from("u1")));

    // Case and whitespace both count.
    assert_eq!(
        repos
            .users
            .find_id_by_email("Ada@example.com")
            .await
            .expect("case lookup"),
        None
    );
    assert_eq!(
        repos
            .users
            .find_id_by_email("nobody@example.com")
            .await
            .expect("miss lookup"),
        None
    );

    let user = repos
        .users
        .get(&UserId::from("u1"))
        .await
        .expect("get")
        .expect("user exists");
    assert_eq!(user.name.as_deref(), Some("Ada"));
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));

    assert!(repos
        .users
        .get(&UserId::from("ghost"))
        .await
        .expect("get missing")
        .is_none());
}
