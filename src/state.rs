use std::sync::Arc;

use crate::config::Config;
use crate::mail::EmailProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Arc<dyn EmailProvider>,
}

impl AppState {
    pub fn new(config: Config, mailer: impl EmailProvider + 'static) -> Self {
        Self {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
        }
    }
}
