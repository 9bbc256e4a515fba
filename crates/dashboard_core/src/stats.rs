use shared::protocol::ListEnvelope;
use tracing::warn;

use crate::{
    http::ApiClient,
    state::{ResourceKind, StatsSnapshot},
};

async fn fetch_count(api: &ApiClient, kind: ResourceKind) -> u64 {
    match api
        .get_json::<ListEnvelope<serde_json::Value>>(kind.path())
        .await
    {
        Ok(envelope) => envelope.count.unwrap_or(0),
        Err(err) => {
            warn!(resource = kind.label(), error = %err, "count fetch failed; defaulting to zero");
            0
        }
    }
}

/// Re-fetches all three resource counts concurrently. A failed or countless
/// response zeroes that count only; the other two proceed.
pub async fn compute_stats(api: &ApiClient) -> StatsSnapshot {
    let (user_count, product_count, order_count) = tokio::join!(
        fetch_count(api, ResourceKind::Users),
        fetch_count(api, ResourceKind::Products),
        fetch_count(api, ResourceKind::Orders),
    );

    StatsSnapshot {
        user_count,
        product_count,
        order_count,
    }
}
