//! Mount points, route patterns and the actions nonces are scoped to
//!
//! The router registers the same constants the actions are derived from,
//! so the nonce issued by a form page always matches the nonce checked when the form is submitted.

use sesame::ActionName;

pub mod mount {
    pub const POSTS: &str = "/posts";
    pub const USERS: &str = "/users";
}

pub mod route {
    pub const ROOT: &str = "/";

    pub const DASHBOARD: &str = "/dashboard";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const SIGNUP: &str = "/signup";
    pub const USER: &str = "/{user_id}";
    pub const USER_DELETE: &str = "/{user_id}/delete";
    pub const USER_EDIT: &str = "/{user_id}/edit";

    pub const NEW_POST: &str = "/new";
    pub const POST: &str = "/{post_id}";
    pub const POST_DELETE: &str = "/{post_id}/delete";
    pub const POST_EDIT: &str = "/{post_id}/edit";
}

/// Mutating action protected by a nonce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Signup,
    Login,
    Logout,
    /// Updating or deleting a user
    EditUser,
    CreatePost,
    /// Updating or deleting a post
    EditPost,
}

impl Action {
    /// Mount point and route pattern the action's form submits to
    #[must_use]
    pub const fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            Self::Signup => (mount::USERS, route::ROOT),
            Self::Login => (mount::USERS, route::LOGIN),
            Self::Logout => (mount::USERS, route::LOGOUT),
            Self::EditUser => (mount::USERS, route::USER),
            Self::CreatePost => (mount::POSTS, route::ROOT),
            Self::EditPost => (mount::POSTS, route::POST),
        }
    }

    #[must_use]
    pub fn name(self) -> ActionName {
        let (mount, route) = self.endpoint();
        ActionName::from_route(mount, route)
    }
}

#[cfg(test)]
mod test {
    use super::{mount, route, Action};
    use sesame::ActionName;

    #[test]
    fn names() {
        assert_eq!(Action::Signup.name().as_str(), "users/");
        assert_eq!(Action::Login.name().as_str(), "users/login");
        assert_eq!(Action::Logout.name().as_str(), "users/logout");
        assert_eq!(Action::EditUser.name().as_str(), "users/:user_id");
        assert_eq!(Action::CreatePost.name().as_str(), "posts/");
        assert_eq!(Action::EditPost.name().as_str(), "posts/:post_id");
    }

    #[test]
    fn form_routes_share_the_resource_action() {
        for route in [route::USER_EDIT, route::USER_DELETE] {
            assert_eq!(
                ActionName::from_route(mount::USERS, route),
                Action::EditUser.name()
            );
        }

        for route in [route::POST_EDIT, route::POST_DELETE] {
            assert_eq!(
                ActionName::from_route(mount::POSTS, route),
                Action::EditPost.name()
            );
        }
    }
}
