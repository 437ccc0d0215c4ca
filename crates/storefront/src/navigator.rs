//! Navigation requests issued by the client (e.g. back to login on 401).

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

/// Receives route changes requested by library code.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Logs navigation requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "Navigation requested");
    }
}

/// Records navigation requests in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    routes: Arc<Mutex<Vec<String>>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every requested route, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.routes.lock().clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_navigator_history() {
        let navigator = MemoryNavigator::new();
        assert_eq!(navigator.last(), None);

        navigator.navigate("/cart");
        navigator.navigate("/user/login");
        assert_eq!(navigator.history(), vec!["/cart", "/user/login"]);
        assert_eq!(navigator.last().as_deref(), Some("/user/login"));
    }
}
