pub mod locale;
pub mod org;
pub mod session;

use crate::error::Result;
use crate::model::{LanguageSelection, SystemSetting};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;

pub use locale::LanguageSelector;
pub use org::{FileOrgDetails, HttpOrgDetails, StaticOrgDetails};
pub use session::SessionUser;

/// Authenticated-user state.
pub trait UserService: Send + Sync {
    fn logged_in(&self) -> bool;
    fn root_org_id(&self) -> Option<String>;
}

/// Organization lookups: the session-derived default org and the
/// `contentComingSoonMsg` system setting.
#[async_trait]
pub trait OrgDetailsService: Send + Sync {
    fn root_org_id(&self) -> Option<String>;

    async fn coming_soon_message(&self) -> Result<SystemSetting>;
}

/// Localization: the language stream and the built-in fallback message.
pub trait ResourceService: Send + Sync {
    /// Emits the current selection first, then each subsequent change.
    fn language_selected(&self) -> BoxStream<'static, LanguageSelection>;

    fn default_coming_soon_message(&self) -> String;
}

#[derive(Clone)]
pub struct Services {
    pub user: Arc<dyn UserService>,
    pub org: Arc<dyn OrgDetailsService>,
    pub resources: Arc<dyn ResourceService>,
}

impl Services {
    /// Logged-in users use their own org; everyone else gets the session default.
    pub fn resolve_root_org_id(&self) -> Option<String> {
        if self.user.logged_in() {
            self.user.root_org_id()
        } else {
            self.org.root_org_id()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSettings;

    #[async_trait]
    impl OrgDetailsService for NoSettings {
        fn root_org_id(&self) -> Option<String> {
            Some("session_org".into())
        }

        async fn coming_soon_message(&self) -> Result<SystemSetting> {
            Ok(SystemSetting::default())
        }
    }

    fn services(logged_in: bool) -> Services {
        Services {
            user: Arc::new(SessionUser::new(logged_in, Some("user_org".into()))),
            org: Arc::new(NoSettings),
            resources: Arc::new(LanguageSelector::new("en", "Content coming soon")),
        }
    }

    #[test]
    fn test_root_org_prefers_logged_in_user() {
        assert_eq!(services(true).resolve_root_org_id().as_deref(), Some("user_org"));
        assert_eq!(services(false).resolve_root_org_id().as_deref(), Some("session_org"));
    }
}
