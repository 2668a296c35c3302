use axum::extract::FromRequestParts;
use http::request::Parts;
use tackboard_db::model::{Post, User};
use tackboard_error::{tackboard_error, Error};

/// Resource a request acts upon
///
/// Inserted by the find-by-id middleware of the route, before any access check runs.
#[derive(Clone, Debug)]
pub struct Target<R>(pub R);

/// Resource that belongs to a user
pub trait Owned {
    fn owner_id(&self) -> i64;
}

impl Owned for User {
    fn owner_id(&self) -> i64 {
        self.id
    }
}

impl Owned for Post {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl<S, R> FromRequestParts<S> for Target<R>
where
    S: Sync,
    R: Clone + Send + Sync + 'static,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            tackboard_error!(format!(
                "route isn't guarded by a loader for {}",
                std::any::type_name::<R>()
            ))
        })
    }
}
