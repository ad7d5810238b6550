//! Environment capabilities and navigation for the auth guard

use crate::config::schema::CapabilitiesConfig;

/// What the surrounding environment can do, decided at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Session state survives between calls
    pub has_persistence: bool,

    /// A navigator can redirect to the login route
    pub can_navigate: bool,
}

impl Capabilities {
    /// Persistence and navigation both available
    pub fn full() -> Self {
        Self {
            has_persistence: true,
            can_navigate: true,
        }
    }

    /// Neither capability available; every operation degrades to a no-op
    pub fn none() -> Self {
        Self {
            has_persistence: false,
            can_navigate: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}

impl From<&CapabilitiesConfig> for Capabilities {
    fn from(config: &CapabilitiesConfig) -> Self {
        Self {
            has_persistence: config.persistence,
            can_navigate: config.navigation,
        }
    }
}

/// Redirects the caller to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Navigator;
    use std::sync::Mutex;

    /// Navigator that records every redirect
    #[derive(Default)]
    pub struct RecordingNavigator {
        routes: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn routes(&self) -> Vec<String> {
            self.routes.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_string());
        }
    }
}
