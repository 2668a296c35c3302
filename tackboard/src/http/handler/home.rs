use crate::http::extractor::ActingAccount;
use axum::response::Html;
use tackboard_error::Result;

#[allow(clippy::unused_async)]
pub async fn get(ActingAccount(account): ActingAccount) -> Result<Html<String>> {
    let page = crate::template::render(
        "home/index.html",
        minijinja::context! {
            account => account,
        },
    )?;

    Ok(Html(page))
}
