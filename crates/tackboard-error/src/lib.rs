#[macro_use]
extern crate tracing;

use std::fmt::{self, Debug, Display};

pub use self::{axum::ErrorMessage, ext::ResultExt};

mod axum;
mod ext;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[macro_export]
macro_rules! bail {
    ($(type = $type:expr,)? $msg:expr) => {
        return Err($crate::tackboard_error!($(type = $type,)? $msg))
    };
}

#[macro_export]
macro_rules! tackboard_error {
    (type = $type:expr, $msg:expr) => {
        $crate::Error::msg($msg).with_error_type($type)
    };
    ($msg:expr) => {
        $crate::tackboard_error!(type = $crate::ErrorType::Other(None), $msg)
    };
}

/// Classification of an error
///
/// Decides which status code the error is rendered with. The optional body is shown to the client,
/// everything else stays in the logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorType {
    BadRequest(Option<String>),
    Conflict(Option<String>),
    NotAcceptable,
    NotFound,
    Unauthorized(Option<String>),
    Other(Option<String>),
}

impl ErrorType {
    /// Attach a client-visible body to the error type
    ///
    /// Types that never carry a body are returned unchanged.
    #[must_use]
    pub fn with_body<B>(self, body: B) -> Self
    where
        B: Into<String>,
    {
        let body = Some(body.into());

        match self {
            Self::BadRequest(..) => Self::BadRequest(body),
            Self::Conflict(..) => Self::Conflict(body),
            Self::Unauthorized(..) => Self::Unauthorized(body),
            Self::Other(..) => Self::Other(body),
            ty @ (Self::NotAcceptable | Self::NotFound) => ty,
        }
    }
}

#[derive(Debug)]
pub struct Error {
    ty: ErrorType,
    inner: eyre::Report,
}

impl Error {
    #[inline]
    pub fn new<E>(ty: ErrorType, err: E) -> Self
    where
        E: Into<eyre::Report>,
    {
        Self {
            ty,
            inner: err.into(),
        }
    }

    #[inline]
    pub fn msg<M>(msg: M) -> Self
    where
        M: Debug + Display + Send + Sync + 'static,
    {
        eyre::Report::msg(msg).into()
    }

    #[must_use]
    pub fn error_type(&self) -> &ErrorType {
        &self.ty
    }

    pub fn error(&self) -> &eyre::Report {
        &self.inner
    }

    #[must_use]
    pub fn into_error(self) -> eyre::Report {
        self.inner
    }

    #[must_use]
    pub fn with_error_type(self, ty: ErrorType) -> Self {
        Self { ty, ..self }
    }
}

impl<T> From<T> for Error
where
    T: Into<eyre::Report>,
{
    fn from(value: T) -> Self {
        Self {
            ty: ErrorType::Other(None),
            inner: value.into(),
        }
    }
}

impl From<Error> for BoxError {
    fn from(value: Error) -> Self {
        BoxError::from(value.inner)
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <eyre::Report as fmt::Display>::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod test {
    use crate::{ErrorType, Result, ResultExt};

    #[test]
    fn macro_sets_type() {
        let error = tackboard_error!(type = ErrorType::NotFound, "missing");
        assert_eq!(*error.error_type(), ErrorType::NotFound);
        assert_eq!(error.to_string(), "missing");
    }

    #[test]
    fn conversion_defaults_to_other() {
        let result: Result<u32> = "nope".parse::<u32>().map_err(Into::into);
        let error = result.unwrap_err();
        assert_eq!(*error.error_type(), ErrorType::Other(None));
    }

    #[test]
    fn ext_overrides_type() {
        let result: Result<u32> = "nope"
            .parse::<u32>()
            .with_error_type(ErrorType::BadRequest(None).with_body("not a number"));

        assert_eq!(
            *result.unwrap_err().error_type(),
            ErrorType::BadRequest(Some("not a number".into()))
        );
    }

    #[test]
    fn body_ignored_for_bodyless_types() {
        assert_eq!(ErrorType::NotFound.with_body("ignored"), ErrorType::NotFound);
    }
}
