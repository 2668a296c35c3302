#[macro_use]
extern crate tracing;

pub mod http;
pub mod signal;
pub mod state;
pub mod template;

use self::state::{Service, SessionConfig, Zustand};
use tackboard_config::Configuration;
use tackboard_db::DbPool;
use tackboard_service::{PostService, UserService};

pub fn initialise_state(config: &Configuration, db_pool: DbPool) -> eyre::Result<Zustand> {
    let user_service = UserService::builder().db_pool(db_pool.clone()).build();
    let post_service = PostService::builder().db_pool(db_pool.clone()).build();

    Ok(Zustand {
        db_pool,
        service: Service {
            post: post_service,
            user: user_service,
        },
        session: SessionConfig::from_configuration(&config.session)?,
    })
}
