//! End-to-end properties over the repos and services against a real
//! Postgres instance. Each test is a no-op unless `TEST_DATABASE_URL`
//! is set.

mod common;

use picshare_service::db::{comment_repo, follow_repo, like_repo, post_repo, save_repo};
use picshare_service::services::{CommentService, FeedService, PostService, ProfileService};

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|d| d.is_unique_violation())
        .unwrap_or(false)
}

#[actix_web::test]
async fn duplicate_like_and_follow_hit_unique_constraints() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let alice = common::seed_user(&pool, "alice", "alice").await;
    let bob = common::seed_user(&pool, "bob", "bob").await;

    let posts = PostService::new(pool.clone());
    let post = posts.create_post(bob, "sunset", None, &[]).await.unwrap();

    like_repo::create_like(&pool, alice, post.id).await.unwrap();
    let dup = like_repo::create_like(&pool, alice, post.id).await;
    assert!(matches!(dup, Err(ref e) if is_unique_violation(e)));

    follow_repo::create_follow(&pool, alice, bob).await.unwrap();
    let dup = follow_repo::create_follow(&pool, alice, bob).await;
    assert!(matches!(dup, Err(ref e) if is_unique_violation(e)));
}

#[actix_web::test]
async fn post_creation_attaches_all_files_in_order() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "author", "author").await;
    let posts = PostService::new(pool.clone());

    let urls: Vec<String> = (0..3).map(|i| format!("https://cdn/img{i}.jpg")).collect();
    let post = posts
        .create_post(author, "beach day", Some("beach,summer"), &urls)
        .await
        .unwrap();

    let files = post_repo::get_post_files(&pool, post.id).await.unwrap();
    assert_eq!(files.len(), 3);
    let stored: Vec<&str> = files.iter().map(|f| f.url.as_str()).collect();
    assert_eq!(stored, vec![
        "https://cdn/img0.jpg",
        "https://cdn/img1.jpg",
        "https://cdn/img2.jpg"
    ]);
}

#[actix_web::test]
async fn failed_file_insert_rolls_back_the_whole_post() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "rollback-author", "ra").await;
    let posts = PostService::new(pool.clone());

    // Second URL exceeds the post_files.url column; the insert fails
    // after the post row and first file are already written.
    let urls = vec!["https://cdn/ok.jpg".to_string(), "x".repeat(201)];
    let result = posts.create_post(author, "doomed", None, &urls).await;

    assert!(result.is_err());
    assert_eq!(post_repo::count_posts_by_user(&pool, author).await.unwrap(), 0);
}

#[actix_web::test]
async fn deleting_a_post_cascades_to_dependents() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "cascade-author", "ca").await;
    let fan = common::seed_user(&pool, "cascade-fan", "cf").await;

    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let post = posts
        .create_post(author, "soon gone", None, &["https://cdn/x.jpg".to_string()])
        .await
        .unwrap();

    comments.create_comment(post.id, fan, "nice").await.unwrap();
    like_repo::create_like(&pool, fan, post.id).await.unwrap();
    save_repo::create_save(&pool, fan, post.id).await.unwrap();

    assert!(posts.delete_post(post.id, author).await.unwrap());

    assert!(post_repo::find_post_by_id(&pool, post.id).await.unwrap().is_none());
    assert!(post_repo::get_post_files(&pool, post.id).await.unwrap().is_empty());
    assert_eq!(comment_repo::count_comments_by_post(&pool, post.id).await.unwrap(), 0);
    assert!(!like_repo::like_exists(&pool, fan, post.id).await.unwrap());
    assert!(!save_repo::save_exists(&pool, fan, post.id).await.unwrap());
}

#[actix_web::test]
async fn only_the_owner_can_delete_a_post() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "owner", "owner").await;
    let intruder = common::seed_user(&pool, "intruder", "in").await;

    let posts = PostService::new(pool.clone());
    let post = posts.create_post(author, "mine", None, &[]).await.unwrap();

    assert!(!posts.delete_post(post.id, intruder).await.unwrap());
    assert!(post_repo::find_post_by_id(&pool, post.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn feed_contains_followed_authors_and_self_only() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let viewer = common::seed_user(&pool, "viewer", "v").await;
    let followed = common::seed_user(&pool, "followed", "f").await;
    let stranger = common::seed_user(&pool, "stranger", "s").await;

    let posts = PostService::new(pool.clone());
    let own = posts.create_post(viewer, "own post", None, &[]).await.unwrap();
    let theirs = posts.create_post(followed, "their post", None, &[]).await.unwrap();
    let unrelated = posts.create_post(stranger, "unrelated", None, &[]).await.unwrap();

    follow_repo::create_follow(&pool, viewer, followed).await.unwrap();

    let feed = FeedService::new(pool.clone());
    let page = feed.get_feed(viewer, 50, 0).await.unwrap();
    let ids: Vec<i64> = page.posts.iter().map(|p| p.id).collect();

    assert!(ids.contains(&own.id));
    assert!(ids.contains(&theirs.id));
    assert!(!ids.contains(&unrelated.id));

    // Unfollow removes the author's posts on the next read.
    assert!(follow_repo::delete_follow(&pool, viewer, followed).await.unwrap());
    let page = feed.get_feed(viewer, 50, 0).await.unwrap();
    let ids: Vec<i64> = page.posts.iter().map(|p| p.id).collect();
    assert!(ids.contains(&own.id));
    assert!(!ids.contains(&theirs.id));
}

#[actix_web::test]
async fn like_and_save_flags_are_viewer_specific() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "flag-author", "fa").await;
    let liker = common::seed_user(&pool, "flag-liker", "fl").await;
    let bystander = common::seed_user(&pool, "flag-bystander", "fb").await;

    let posts = PostService::new(pool.clone());
    let post = posts.create_post(author, "flagged", None, &[]).await.unwrap();

    like_repo::create_like(&pool, liker, post.id).await.unwrap();
    save_repo::create_save(&pool, liker, post.id).await.unwrap();

    let seen_by_liker = posts.get_post_view(post.id, liker).await.unwrap().unwrap();
    assert!(seen_by_liker.is_liked);
    assert!(seen_by_liker.is_saved);
    assert_eq!(seen_by_liker.likes_count, 1);

    let seen_by_bystander = posts.get_post_view(post.id, bystander).await.unwrap().unwrap();
    assert!(!seen_by_bystander.is_liked);
    assert!(!seen_by_bystander.is_saved);
    assert_eq!(seen_by_bystander.likes_count, 1);
}

#[actix_web::test]
async fn profile_view_reflects_relationship_to_viewer() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let subject = common::seed_user(&pool, "subject", "subject").await;
    let fan = common::seed_user(&pool, "fan", "fan").await;

    let posts = PostService::new(pool.clone());
    posts.create_post(subject, "first", None, &[]).await.unwrap();
    posts.create_post(subject, "second", None, &[]).await.unwrap();

    follow_repo::create_follow(&pool, fan, subject).await.unwrap();

    let profiles = ProfileService::new(pool.clone());

    let own_view = profiles.get_profile_view(subject, subject).await.unwrap().unwrap();
    assert!(own_view.is_me);
    assert!(!own_view.is_following);
    assert_eq!(own_view.post_count, 2);
    assert_eq!(own_view.followers_count, 1);

    let fan_view = profiles.get_profile_view(subject, fan).await.unwrap().unwrap();
    assert!(!fan_view.is_me);
    assert!(fan_view.is_following);
    assert_eq!(fan_view.posts.len(), 2);
}

#[actix_web::test]
async fn saved_posts_surface_on_the_savers_profile() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "save-author", "sa").await;
    let saver = common::seed_user(&pool, "saver", "sv").await;

    let posts = PostService::new(pool.clone());
    let post = posts.create_post(author, "keeper", None, &[]).await.unwrap();
    save_repo::create_save(&pool, saver, post.id).await.unwrap();

    let profiles = ProfileService::new(pool.clone());
    let view = profiles.get_profile_view(saver, saver).await.unwrap().unwrap();

    assert_eq!(view.saved_posts.len(), 1);
    assert_eq!(view.saved_posts[0].id, post.id);
}

#[actix_web::test]
async fn caption_and_tag_search_matches_substrings() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "search-author", "se").await;
    let posts = PostService::new(pool.clone());

    let marker = format!("needle{}", rand::random::<u64>());
    let by_caption = posts
        .create_post(author, &format!("a {marker} in the grass"), None, &[])
        .await
        .unwrap();
    let by_tags = posts
        .create_post(author, "plain caption", Some(&format!("{marker},misc")), &[])
        .await
        .unwrap();
    posts.create_post(author, "hay only", None, &[]).await.unwrap();

    let found = post_repo::search_posts(&pool, &marker, 50, 0).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|p| p.id).collect();
    assert!(ids.contains(&by_caption.id));
    assert!(ids.contains(&by_tags.id));
    assert_eq!(ids.len(), 2);
}

#[actix_web::test]
async fn comment_views_carry_author_summaries() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    let author = common::seed_user(&pool, "c-author", "ca").await;
    let commenter = common::seed_user(&pool, "c-commenter", "carol").await;

    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let post = posts.create_post(author, "discuss", None, &[]).await.unwrap();
    let comment = comments.create_comment(post.id, commenter, "hot take").await.unwrap();

    let views = comments.get_post_comment_views(post.id).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, comment.id);
    assert_eq!(views[0].text, "hot take");
    assert_eq!(views[0].user.nickname, "carol");
}
