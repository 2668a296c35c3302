use crate::http::{
    action::mount,
    extractor::{ActingAccount, AgnosticForm, Json, Target},
    handler::created,
    negotiate::Format,
    USER_COOKIE,
};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::{
    either::Either,
    extract::{
        cookie::{Cookie, SameSite},
        CookieJar,
    },
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tackboard_db::model::{Post, User};
use tackboard_error::Result;
use tackboard_service::{
    user::{Register, Update},
    UserService,
};

pub mod dashboard;
pub mod delete;
pub mod edit;
pub mod login;
pub mod logout;
pub mod signup;

const DASHBOARD_PATH: &str = "/users/dashboard";

/// Name and password, as submitted by the sign-up, login and edit forms
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    name: String,
    password: String,
}

#[derive(Serialize)]
pub struct UserWithPosts {
    #[serde(flatten)]
    user: User,
    posts: Vec<Post>,
}

fn location(user: &User) -> String {
    format!("{}/{}", mount::USERS, user.id)
}

fn account_cookie(user: &User) -> Cookie<'static> {
    Cookie::build((USER_COOKIE, user.uid.clone()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build(USER_COOKIE).path("/").build()
}

pub async fn index(
    format: Format,
    ActingAccount(account): ActingAccount,
    State(user_service): State<UserService>,
) -> Result<Either<Html<String>, Json<Vec<UserWithPosts>>>> {
    let users: Vec<UserWithPosts> = user_service
        .list_with_posts()
        .await?
        .into_iter()
        .map(|(user, posts)| UserWithPosts { user, posts })
        .collect();

    match format {
        Format::Html => {
            let page = crate::template::render(
                "users/index.html",
                minijinja::context! {
                    account => account,
                    users => users,
                },
            )?;

            Ok(Either::E1(Html(page)))
        }
        Format::Json => Ok(Either::E2(Json(users))),
    }
}

/// Sign up and log in as the new user
pub async fn create(
    format: Format,
    State(user_service): State<UserService>,
    cookies: CookieJar,
    AgnosticForm(form): AgnosticForm<Credentials>,
) -> Result<Response> {
    let register = Register::builder()
        .name(form.name)
        .password(form.password)
        .build();

    let user = user_service.register(register).await?;
    let cookies = cookies.add(account_cookie(&user));

    Ok((cookies, created(format, location(&user), &user)).into_response())
}

pub async fn show(
    format: Format,
    ActingAccount(account): ActingAccount,
    State(user_service): State<UserService>,
    Target(user): Target<User>,
) -> Result<Response> {
    match format {
        Format::Html => {
            if account.as_ref().is_some_and(|account| account.id == user.id) {
                return Ok(Redirect::to(DASHBOARD_PATH).into_response());
            }

            let posts = user_service.posts_of(user.id).await?;
            let page = crate::template::render(
                "users/show.html",
                minijinja::context! {
                    account => account,
                    user => user,
                    posts => posts,
                },
            )?;

            Ok(Html(page).into_response())
        }
        Format::Json => Ok(Json(user).into_response()),
    }
}

pub async fn update(
    format: Format,
    State(user_service): State<UserService>,
    Target(user): Target<User>,
    AgnosticForm(form): AgnosticForm<Credentials>,
) -> Result<Response> {
    let update = Update::builder()
        .name(form.name)
        .password(form.password)
        .build();

    let user = user_service.update(user.id, update).await?;

    Ok(created(format, location(&user), &user))
}

/// Delete the account and log out
pub async fn delete(
    State(user_service): State<UserService>,
    Target(user): Target<User>,
    cookies: CookieJar,
) -> Result<(CookieJar, StatusCode)> {
    user_service.delete(user.id).await?;

    Ok((cookies.remove(removal_cookie()), StatusCode::NO_CONTENT))
}
