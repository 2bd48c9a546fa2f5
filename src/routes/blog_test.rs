use super::*;
use crate::content::BLOG_POSTS;
use crate::routes::api_routes;
use crate::routes::test_support::send;
use crate::state::test_helpers;

#[tokio::test]
async fn listing_omits_content() {
    let (status, body) = send(api_routes(test_helpers::test_app_state()), "GET", "/api/blog", None).await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().expect("array");
    assert_eq!(posts.len(), BLOG_POSTS.len());
    assert!(posts.iter().all(|p| p.get("content").is_none()));
    assert_eq!(posts[0]["slug"], BLOG_POSTS[0].slug);
}

#[tokio::test]
async fn post_by_slug() {
    let uri = format!("/api/blog/{}", BLOG_POSTS[1].slug);
    let (status, body) = send(api_routes(test_helpers::test_app_state()), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], BLOG_POSTS[1].title);
    assert_eq!(body["content"], BLOG_POSTS[1].content);
}

#[tokio::test]
async fn unknown_slug_is_404() {
    let (status, body) =
        send(api_routes(test_helpers::test_app_state()), "GET", "/api/blog/no-such-post", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "post not found");
}
