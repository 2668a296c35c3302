use axum::extract::FromRef;
use cookie::Key;
use rand::RngCore;
use sesame::InMemoryStore;
use std::time::Duration;
use tackboard_config::session;
use tackboard_db::DbPool;
use tackboard_service::{PostService, UserService};

const KEY_DERIVATION_CONTEXT: &str = "tackboard 2024-11-02 session cookie signing key";

macro_rules! impl_from_ref {
    ($source:path; [ $($target:path => $extract_impl:expr),+ ]) => {
        $(
            impl ::axum::extract::FromRef<$source> for $target {
                fn from_ref(input: &$source) -> Self {
                    #[allow(clippy::redundant_closure_call)]
                    ($extract_impl)(input)
                }
            }
        )+
    };
}

impl_from_ref! {
    Zustand;
    [
        PostService => |input: &Zustand| input.service.post.clone(),
        UserService => |input: &Zustand| input.service.user.clone()
    ]
}

/// Everything the session middleware needs
#[derive(Clone)]
pub struct SessionConfig {
    pub key: Key,
    pub secure: bool,
    pub store: InMemoryStore,
}

impl SessionConfig {
    /// Build the session configuration
    ///
    /// The cookie signing key is derived from the configured secret. Without a secret a random one is used,
    /// which means sessions don't survive a restart.
    pub fn from_configuration(config: &session::Configuration) -> eyre::Result<Self> {
        let key_material = if let Some(ref secret) = config.secret {
            if secret.trim().is_empty() {
                eyre::bail!("session secret must not be blank");
            }

            blake3::derive_key(KEY_DERIVATION_CONTEXT, secret.as_bytes())
        } else {
            warn!("no session secret configured, generating a random one");

            let mut secret = [0; 32];
            rand::thread_rng().fill_bytes(&mut secret);
            blake3::derive_key(KEY_DERIVATION_CONTEXT, &secret)
        };

        Ok(Self {
            key: Key::derive_from(&key_material),
            secure: config.secure_cookies,
            store: InMemoryStore::new(
                config.max_sessions,
                Duration::from_secs(config.idle_timeout_secs),
            ),
        })
    }
}

/// Service collection
///
/// This contains all the "services" that TackBoard consists of.
#[derive(Clone)]
pub struct Service {
    pub post: PostService,
    pub user: UserService,
}

/// Application state
///
/// Called it "Zustand" to avoid a name collission with `axum::extract::State`.
/// "Zustand" is just the german word for state.
#[derive(Clone, FromRef)]
pub struct Zustand {
    pub db_pool: DbPool,
    pub service: Service,
    pub session: SessionConfig,
}
