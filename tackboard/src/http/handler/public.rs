use axum::extract::Path;
use axum_extra::TypedHeader;
use headers::ContentType;
use rust_embed::RustEmbed;
use std::borrow::Cow;
use tackboard_error::{tackboard_error, ErrorType, Result};

#[derive(RustEmbed)]
#[folder = "assets"]
struct AssetsDir;

#[allow(clippy::unused_async)]
pub async fn get(
    Path(path): Path<String>,
) -> Result<(TypedHeader<ContentType>, Cow<'static, [u8]>)> {
    let Some(file) = AssetsDir::get(&path) else {
        return Err(tackboard_error!(type = ErrorType::NotFound, "asset not found"));
    };
    let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

    Ok((TypedHeader(ContentType::from(mime_type)), file.data))
}
