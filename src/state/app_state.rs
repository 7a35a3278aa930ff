use log::info;
use parking_lot::RwLock;

use crate::config::Config;
use crate::db::{LinkStore, UserDirectory};
use crate::errors::AppError;
use crate::utils::cookies::CookieBuilder;
use crate::utils::session::SessionKeys;

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "purple-monkey-dinosaur";

/// Everything a request handler needs, shared across workers via `web::Data`.
pub struct AppState {
    pub users: UserDirectory,
    pub links: RwLock<LinkStore>,
    pub sessions: SessionKeys,
    pub cookies: CookieBuilder,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            users: UserDirectory::new(config.bcrypt_cost),
            links: RwLock::new(LinkStore::new()),
            sessions: SessionKeys::new(&config.session_secret, config.session_ttl()),
            cookies: CookieBuilder::new(config.cookie_secure, config.session_ttl()),
        }
    }

    /// Populate a demo account owning the two classic sample links.
    pub fn seed_demo_data(&self) -> Result<(), AppError> {
        let user = self.users.create(DEMO_EMAIL, DEMO_PASSWORD)?;

        let mut links = self.links.write();
        for long_url in ["http://www.lighthouselabs.ca", "http://www.google.com"] {
            let link = links.create(&user.id, long_url);
            info!("Seeded {} -> {}", link.alias, link.long_url);
        }

        Ok(())
    }
}
