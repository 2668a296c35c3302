#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub use self::{
    future::ResponseFuture,
    handle::SessionHandle,
    layer::SessionLayer,
    newtypes::*,
    service::SessionService,
    state::{NonceError, SessionState},
    store::{InMemoryStore, Session, SessionStore},
};

mod future;
mod handle;
mod layer;
mod service;
mod state;
mod store;

const DEFAULT_COOKIE_NAME: &str = "sesame.sid";
const RANDOM_DATA_LEN: usize = 32;

fn random_hex() -> String {
    use hex_simd::AsciiCase;
    use rand::RngCore;

    let mut buf = [0_u8; RANDOM_DATA_LEN];
    rand::thread_rng().fill_bytes(&mut buf);
    hex_simd::encode_to_string(buf, AsciiCase::Lower)
}

mod newtypes {
    /// Opaque identifier of a session, stored inside the session cookie
    #[aliri_braid::braid]
    pub struct SessionId;

    /// Single-use secret bound to an action
    #[aliri_braid::braid]
    pub struct Token;

    /// Name of the action a nonce is scoped to
    ///
    /// Built from the mount point of a router and the route pattern inside of it,
    /// see [`ActionName::from_route`].
    #[aliri_braid::braid]
    pub struct ActionName;

    impl SessionId {
        pub(crate) fn generate() -> Self {
            Self::new(super::random_hex())
        }
    }

    impl Token {
        pub(crate) fn generate() -> Self {
            Self::new(super::random_hex())
        }
    }

    impl ActionName {
        /// Derive the action name from where a form is submitted to
        ///
        /// Takes the first path segment of the mount point and the first path segment of the route pattern
        /// and joins them with a slash. Route parameters written as `{name}` are normalised to `:name`.
        ///
        /// ```
        /// # use sesame::ActionName;
        /// assert_eq!(ActionName::from_route("/posts", "/{post_id}/edit").as_str(), "posts/:post_id");
        /// assert_eq!(ActionName::from_route("/users", "/").as_str(), "users/");
        /// ```
        #[must_use]
        pub fn from_route(mount: &str, route: &str) -> Self {
            let mount = mount.split('/').nth(1).unwrap_or_default();
            let route = route.split('/').nth(1).unwrap_or_default();

            let route = match route
                .strip_prefix('{')
                .and_then(|param| param.strip_suffix('}'))
            {
                Some(param) => format!(":{param}"),
                None => route.to_string(),
            };

            Self::new(format!("{mount}/{route}"))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::ActionName;

    #[test]
    fn action_name_from_route() {
        assert_eq!(ActionName::from_route("/users", "/login").as_str(), "users/login");
        assert_eq!(ActionName::from_route("/users", "/").as_str(), "users/");
        assert_eq!(ActionName::from_route("/users", "").as_str(), "users/");
        assert_eq!(ActionName::from_route("/users", "/{user_id}").as_str(), "users/:user_id");
        assert_eq!(
            ActionName::from_route("/users", "/{user_id}/delete").as_str(),
            "users/:user_id"
        );
        assert_eq!(ActionName::from_route("/posts", "/:post_id").as_str(), "posts/:post_id");
    }

    #[test]
    fn random_values_are_distinct() {
        let first = super::random_hex();
        let second = super::random_hex();

        assert_eq!(first.len(), super::RANDOM_DATA_LEN * 2);
        assert_ne!(first, second);
    }
}
