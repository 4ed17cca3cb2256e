use std::sync::Arc;

use tavola_engine::Engine;

use crate::config::Config;

/// Shared application state passed to all handlers.
///
/// The engine owns the thread memory; handlers reach it through
/// `engine.memory()`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(config: Config, engine: Engine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
