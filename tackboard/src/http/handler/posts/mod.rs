use crate::http::{
    action::mount,
    extractor::{ActingAccount, AgnosticForm, Authenticated, Json, Target},
    handler::created,
    negotiate::Format,
};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::either::Either;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tackboard_db::model::{Post, User};
use tackboard_error::{tackboard_error, ErrorType, Result};
use tackboard_service::{
    post::{CreatePost, UpdatePost},
    PostService,
};

pub mod delete;
pub mod edit;
pub mod new;

/// Fields of the post creation and edit forms
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    title: String,
    link: String,
    description: String,
}

#[derive(Serialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    post: Post,
    user: User,
}

fn location(post: &Post) -> String {
    format!("{}/{}", mount::POSTS, post.id)
}

pub async fn index(
    format: Format,
    ActingAccount(account): ActingAccount,
    State(post_service): State<PostService>,
) -> Result<Either<Html<String>, Json<Vec<PostWithAuthor>>>> {
    let posts: Vec<PostWithAuthor> = post_service
        .list_with_authors()
        .await?
        .into_iter()
        .map(|(post, user)| PostWithAuthor { post, user })
        .collect();

    match format {
        Format::Html => {
            let page = crate::template::render(
                "posts/index.html",
                minijinja::context! {
                    account => account,
                    posts => posts,
                },
            )?;

            Ok(Either::E1(Html(page)))
        }
        Format::Json => Ok(Either::E2(Json(posts))),
    }
}

/// Create a post owned by the logged-in user
pub async fn create(
    format: Format,
    State(post_service): State<PostService>,
    Authenticated(account): Authenticated,
    AgnosticForm(form): AgnosticForm<PostForm>,
) -> Result<Response> {
    let create = CreatePost::builder()
        .user_id(account.id)
        .title(form.title)
        .link(form.link)
        .description(form.description)
        .build();

    let post = post_service.create(create).await?;

    Ok(created(format, location(&post), &post))
}

pub async fn show(
    format: Format,
    ActingAccount(account): ActingAccount,
    State(post_service): State<PostService>,
    Target(post): Target<Post>,
) -> Result<Either<Html<String>, Json<PostWithAuthor>>> {
    let (post, user) = post_service
        .get_with_author(post.id)
        .await?
        .ok_or_else(|| tackboard_error!(type = ErrorType::NotFound, "post not found"))?;

    match format {
        Format::Html => {
            let owned = account.as_ref().is_some_and(|account| account.id == post.user_id);
            let page = crate::template::render(
                "posts/show.html",
                minijinja::context! {
                    account => account,
                    owned => owned,
                    post => post,
                    user => user,
                },
            )?;

            Ok(Either::E1(Html(page)))
        }
        Format::Json => Ok(Either::E2(Json(PostWithAuthor { post, user }))),
    }
}

pub async fn update(
    format: Format,
    State(post_service): State<PostService>,
    Target(post): Target<Post>,
    AgnosticForm(form): AgnosticForm<PostForm>,
) -> Result<Response> {
    let update = UpdatePost::builder()
        .title(form.title)
        .link(form.link)
        .description(form.description)
        .build();

    let post = post_service.update(post.id, update).await?;

    Ok(created(format, location(&post), &post))
}

pub async fn delete(
    State(post_service): State<PostService>,
    Target(post): Target<Post>,
) -> Result<Response> {
    post_service.delete(post.id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
