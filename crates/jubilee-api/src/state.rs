//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use jubilee_agent::card;
use jubilee_agent::responder::Responder;
use jubilee_core::config::JubileeConfig;
use jubilee_store::store::BirthdayStore;
use jubilee_wish::provider::WishProvider;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The store
/// carries its own lock; everything else here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<JubileeConfig>,
    /// The birthday record store.
    pub store: Arc<BirthdayStore>,
    /// Message router and response composer.
    pub responder: Arc<Responder>,
    /// Agent card served from the well-known route.
    pub agent_card: Arc<Value>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    ///
    /// The wish provider is optional; without one, every wish request takes
    /// the fallback path.
    pub fn new(
        config: JubileeConfig,
        store: Arc<BirthdayStore>,
        wish: Option<Arc<dyn WishProvider>>,
    ) -> Self {
        let agent_card = card::load_or_default(&config.agent.card_paths);
        let responder = Responder::new(Arc::clone(&store), wish);
        Self {
            config: Arc::new(config),
            store,
            responder: Arc::new(responder),
            agent_card: Arc::new(agent_card),
            start_time: Instant::now(),
        }
    }
}
