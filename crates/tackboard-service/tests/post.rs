use tackboard_error::ErrorType;
use tackboard_service::{
    post::{CreatePost, UpdatePost},
    user::Register,
    PostService, UserService,
};
use tackboard_test::database_test;

#[tokio::test]
async fn create_normalises_link() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool.clone()).build();
        let post_service = PostService::builder().db_pool(db_pool).build();

        let user = user_service
            .register(Register::builder().name("aurelia").password("secret").build())
            .await
            .unwrap();

        let post = post_service
            .create(
                CreatePost::builder()
                    .user_id(user.id)
                    .title("  Search  ")
                    .link("www.google.com")
                    .description("Finds things")
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(post.title, "Search");
        assert_eq!(post.link, "http://www.google.com");
        assert_eq!(post.user_id, user.id);

        let (fetched, author) = post_service.get_with_author(post.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, post.id);
        assert_eq!(author.id, user.id);

        let listing = post_service.list_with_authors().await.unwrap();
        assert_eq!(listing.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn invalid_posts_rejected() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool.clone()).build();
        let post_service = PostService::builder().db_pool(db_pool).build();

        let user = user_service
            .register(Register::builder().name("aurelia").password("secret").build())
            .await
            .unwrap();

        let long_description = "x".repeat(256);
        let invalid = [
            ("", "www.google.com", ""),
            ("Search", "", ""),
            ("Search", "not a link", ""),
            ("Search", "www.google.com", long_description.as_str()),
        ];

        for (title, link, description) in invalid {
            let error = post_service
                .create(
                    CreatePost::builder()
                        .user_id(user.id)
                        .title(title)
                        .link(link)
                        .description(description)
                        .build(),
                )
                .await
                .unwrap_err();

            assert!(
                matches!(error.error_type(), ErrorType::BadRequest(Some(..))),
                "{title:?} / {link:?} wasn't rejected"
            );
        }

        assert!(post_service.list_with_authors().await.unwrap().is_empty());
    })
    .await;
}

#[tokio::test]
async fn update_and_delete() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool.clone()).build();
        let post_service = PostService::builder().db_pool(db_pool).build();

        let user = user_service
            .register(Register::builder().name("aurelia").password("secret").build())
            .await
            .unwrap();

        let post = post_service
            .create(
                CreatePost::builder()
                    .user_id(user.id)
                    .title("Search")
                    .link("www.google.com")
                    .build(),
            )
            .await
            .unwrap();

        let updated = post_service
            .update(
                post.id,
                UpdatePost::builder()
                    .title("Better search")
                    .link("https://duckduckgo.com")
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Better search");
        assert_eq!(updated.link, "https://duckduckgo.com");

        post_service.delete(post.id).await.unwrap();
        assert!(post_service.get_by_id(post.id).await.unwrap().is_none());

        let error = post_service.delete(post.id).await.unwrap_err();
        assert_eq!(*error.error_type(), ErrorType::NotFound);

        let error = post_service
            .update(
                post.id,
                UpdatePost::builder()
                    .title("Gone")
                    .link("www.google.com")
                    .build(),
            )
            .await
            .unwrap_err();
        assert_eq!(*error.error_type(), ErrorType::NotFound);
    })
    .await;
}
