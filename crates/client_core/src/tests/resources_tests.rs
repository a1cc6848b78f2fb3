use super::*;
use crate::{
    error::{ClientError, ValidationError},
    test_support::{me, other_user, photo, FakeBackend},
};
use reqwest::Method;

fn resource_service() -> (Arc<FakeBackend>, ResourceService) {
    let backend = FakeBackend::new();
    (backend.clone(), ResourceService::new(backend))
}

#[tokio::test]
async fn gallery_keeps_backend_order() {
    let (backend, resources) = resource_service();
    backend.seed_photos(vec![
        photo("b", other_user(), Vec::new()),
        photo("a", me(), Vec::new()),
    ]);

    let photos = resources.fetch_gallery().await.expect("gallery");

    let ids: Vec<&str> = photos.iter().map(|photo| photo.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[tokio::test]
async fn toggle_like_picks_verb_from_membership() {
    let (backend, resources) = resource_service();
    let liked = photo("liked", other_user(), vec![me()]);
    let unliked = photo("unliked", other_user(), vec![other_user()]);
    backend.seed_photos(vec![liked.clone(), unliked.clone()]);

    let after_unlike = resources.toggle_like(&liked, &me().id).await.expect("unlike");
    let after_like = resources.toggle_like(&unliked, &me().id).await.expect("like");

    assert_eq!(backend.calls_to(Method::DELETE, "/cards/liked/likes"), 1);
    assert_eq!(backend.calls_to(Method::PUT, "/cards/unliked/likes"), 1);
    assert!(!after_unlike.is_liked_by(&me().id));
    assert!(after_like.is_liked_by(&me().id));
    assert!(after_like.is_liked_by(&other_user().id));
}

#[tokio::test]
async fn toggling_twice_restores_like_set() {
    let (backend, resources) = resource_service();
    let original = photo("p", other_user(), vec![other_user()]);
    backend.seed_photos(vec![original.clone()]);

    let once = resources.toggle_like(&original, &me().id).await.expect("first");
    let twice = resources.toggle_like(&once, &me().id).await.expect("second");

    assert_ne!(once.liked_by_ids(), original.liked_by_ids());
    assert_eq!(twice.liked_by_ids(), original.liked_by_ids());
}

#[tokio::test]
async fn profile_updates_send_only_their_fields() {
    let (backend, resources) = resource_service();

    let updated = resources
        .update_profile(" Marie ", "Physicist")
        .await
        .expect("profile");
    let with_avatar = resources
        .update_avatar("https://pictures.example/marie.png")
        .await
        .expect("avatar");

    assert_eq!(updated.name, "Marie");
    assert_eq!(with_avatar.about, "Physicist");
    assert_eq!(with_avatar.avatar_url, "https://pictures.example/marie.png");

    let calls = backend.calls();
    let profile_body = calls[0].body.as_ref().expect("profile body");
    assert_eq!(profile_body.as_object().map(|o| o.len()), Some(2));
    let avatar_body = calls[1].body.as_ref().expect("avatar body");
    assert_eq!(avatar_body["avatar"], "https://pictures.example/marie.png");
    assert_eq!(calls[1].path, "/users/me/avatar");
}

#[tokio::test]
async fn invalid_forms_never_reach_the_backend() {
    let (backend, resources) = resource_service();

    let errors = [
        resources.create_photo("", "https://x.example/a.jpg").await,
        resources.create_photo("Lake", "ftp://x.example/a.jpg").await,
        resources
            .update_profile("Marie", "")
            .await
            .map(|_| photo("unused", me(), Vec::new())),
        resources
            .update_avatar("nope")
            .await
            .map(|_| photo("unused", me(), Vec::new())),
    ];

    for result in errors {
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn delete_surfaces_backend_errors() {
    let (_, resources) = resource_service();

    let err = resources
        .delete_photo(&PhotoId::new("missing"))
        .await
        .expect_err("unknown photo");

    assert_eq!(err.status(), Some(404));
    assert!(err.is_remote());
    assert!(!matches!(err, ClientError::Validation(ValidationError::Missing(_))));
}
