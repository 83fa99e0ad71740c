use std::sync::Arc;

use tokio::sync::Mutex;

use parley_analytics::Analytics;
use parley_core::settings::Settings;

use crate::routes::feedback::FeedbackRateLimiter;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub aws: aws_config::SdkConfig,
    pub analytics: Arc<Analytics>,
    pub feedback_limiter: Arc<Mutex<FeedbackRateLimiter>>,
}

impl AppState {
    pub fn new(settings: Settings, aws: aws_config::SdkConfig) -> Self {
        let analytics = Analytics::from_settings(&settings);
        Self {
            settings: Arc::new(settings),
            aws,
            analytics: Arc::new(analytics),
            feedback_limiter: Arc::new(Mutex::new(FeedbackRateLimiter::default())),
        }
    }
}
