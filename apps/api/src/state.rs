use std::sync::Arc;

use crate::config::Config;
use crate::suggestions::enhancer::Enhancer;
use crate::suggestions::store::SuggestionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable suggestion source. Default: RuleBasedEnhancer.
    pub enhancer: Arc<dyn Enhancer>,
    /// Redis when `REDIS_URL` is set, in-process TTL map otherwise.
    pub suggestions: Arc<dyn SuggestionStore>,
}
