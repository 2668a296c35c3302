use tackboard_error::ErrorType;
use tackboard_service::{
    post::CreatePost,
    user::{Login, Register, Update},
    PostService, UserService,
};
use tackboard_test::database_test;

#[tokio::test]
async fn register_and_authenticate() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool).build();

        let user = user_service
            .register(Register::builder().name("aurelia").password("736563726574").build())
            .await
            .unwrap();

        assert_eq!(user.name, "aurelia");
        assert_eq!(user.uid.len(), 32);

        let authenticated = user_service
            .authenticate(Login::builder().name("aurelia").password("736563726574").build())
            .await
            .unwrap();
        assert_eq!(authenticated.map(|user| user.id), Some(user.id));

        let wrong_password = user_service
            .authenticate(Login::builder().name("aurelia").password("nope").build())
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        let unknown = user_service
            .authenticate(Login::builder().name("nobody").password("736563726574").build())
            .await
            .unwrap();
        assert!(unknown.is_none());

        let by_uid = user_service.get_by_uid(&user.uid).await.unwrap();
        assert_eq!(by_uid.map(|user| user.id), Some(user.id));
    })
    .await;
}

#[tokio::test]
async fn duplicate_name_rejected() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool).build();
        let register = Register::builder().name("aurelia").password("secret").build();

        user_service.register(register.clone()).await.unwrap();
        let error = user_service.register(register).await.unwrap_err();

        assert!(matches!(error.error_type(), ErrorType::BadRequest(Some(..))));
    })
    .await;
}

#[tokio::test]
async fn invalid_registration_rejected() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool).build();
        let error = user_service
            .register(Register::builder().name("").password("secret").build())
            .await
            .unwrap_err();

        assert!(matches!(error.error_type(), ErrorType::BadRequest(Some(..))));
    })
    .await;
}

#[tokio::test]
async fn update_changes_credentials() {
    database_test(|db_pool| async move {
        let user_service = UserService::builder().db_pool(db_pool).build();
        let user = user_service
            .register(Register::builder().name("aurelia").password("old").build())
            .await
            .unwrap();

        let updated = user_service
            .update(
                user.id,
                Update::builder().name("kestrel").password("new").build(),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, "kestrel");
        assert_eq!(updated.uid, user.uid);

        let authenticated = user_service
            .authenticate(Login::builder().name("kestrel").password("new").build())
            .await
            .unwrap();
        assert!(authenticated.is_some());
    })
    .await;
}

#[tokio::test]
async fn delete_removes_posts() {
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

        let listing = user_service.list_with_posts().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].1.len(), 1);

        user_service.delete(user.id).await.unwrap();

        assert!(user_service.get_by_id(user.id).await.unwrap().is_none());
        assert!(post_service.get_by_id(post.id).await.unwrap().is_none());

        let error = user_service.delete(user.id).await.unwrap_err();
        assert_eq!(*error.error_type(), ErrorType::NotFound);
    })
    .await;
}
