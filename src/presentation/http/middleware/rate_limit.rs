// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type RateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-client-IP limiter allowing `per_second` requests a second with a
/// burst of twice that. `None` when `per_second` is zero.
pub fn rate_limit_layer(per_second: u64) -> Option<RateLimitLayer> {
    if per_second == 0 {
        return None;
    }

    let mut builder = GovernorConfigBuilder::default();
    builder.per_millisecond((1000 / per_second).max(1));
    builder.burst_size(u32::try_from(per_second.saturating_mul(2)).unwrap_or(u32::MAX));
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    Some(GovernorLayer::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_disables_the_limiter() {
        assert!(rate_limit_layer(0).is_none());
        assert!(rate_limit_layer(10).is_some());
    }
}
