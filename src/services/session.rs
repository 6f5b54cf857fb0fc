use super::UserService;
use crate::config::SessionConfig;

/// Session state taken from configuration.
#[derive(Debug, Clone)]
pub struct SessionUser {
    logged_in: bool,
    root_org_id: Option<String>,
}

impl SessionUser {
    pub fn new(logged_in: bool, root_org_id: Option<String>) -> Self {
        Self {
            logged_in,
            root_org_id,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.logged_in, config.user_root_org_id.clone())
    }
}

impl UserService for SessionUser {
    fn logged_in(&self) -> bool {
        self.logged_in
    }

    fn root_org_id(&self) -> Option<String> {
        self.root_org_id.clone()
    }
}
