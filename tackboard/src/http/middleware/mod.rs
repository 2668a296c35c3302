pub use self::{
    account::resolve_account,
    error::render_error,
    guard::{
        load_post, load_user, reject_if_authenticated, require_authenticated, require_ownership,
    },
    nonce::{require_nonce, NonceGuard},
};

mod account;
mod error;
mod guard;
mod nonce;
