use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

use crate::error::{VoiceError, VoiceResult};

/// Client-side router seam
pub trait Navigator: Send {
    /// # Errors
    ///
    /// Implementations reject paths they cannot route to.
    fn navigate(&mut self, path: &str) -> VoiceResult<()>;
}

/// Routes registered by the application shell
pub fn default_routes() -> Vec<String> {
    [
        "/",
        "/register",
        "/signin",
        "/chatbot",
        "/emergency",
        "/quick-checkup",
        "/health-metrics",
        "/appointments",
        "/landing",
        "/profile",
        "/contact",
        "/admin-login",
        "/about",
    ]
    .iter()
    .map(|r| (*r).to_string())
    .collect()
}

/// Page name spoken back to the user: the path without its leading slash,
/// `home` for the root
pub fn page_name(path: &str) -> &str {
    match path.strip_prefix('/').unwrap_or(path) {
        "" => "home",
        name => name,
    }
}

/// In-memory router keeping the visited path history. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    routes: Option<Arc<Vec<String>>>,
    visited: Arc<Mutex<Vec<String>>>,
}

impl MemoryNavigator {
    /// Accepts any path
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts only `routes`
    pub fn with_routes(routes: Vec<String>) -> Self {
        Self {
            routes: Some(Arc::new(routes)),
            visited: Arc::default(),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.visited.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.visited.lock().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&mut self, path: &str) -> VoiceResult<()> {
        if let Some(routes) = &self.routes {
            if !routes.iter().any(|r| r == path) {
                return Err(VoiceError::Navigation(format!("no route registered for {path}")));
            }
        }
        info!(path, "navigating");
        self.visited.lock().push(path.to_string());
        Ok(())
    }
}
