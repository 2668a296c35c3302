#[macro_use]
extern crate tracing;

use garde::Report;
use tackboard_error::{Error, ErrorType};

pub mod post;
pub mod user;

pub use self::{post::PostService, user::UserService};

/// Reject strings that are empty or consist only of whitespace
#[inline]
fn not_blank<T>(value: &str, _context: &T) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }

    Ok(())
}

/// Turn a validation report into a client error that shows the report
#[inline]
fn invalid_input(report: Report) -> Error {
    let body = report.to_string();
    Error::new(ErrorType::BadRequest(None).with_body(body), report)
}
