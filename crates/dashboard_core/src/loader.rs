use serde::de::DeserializeOwned;
use shared::protocol::ListEnvelope;
use tracing::warn;

use crate::{http::ApiClient, state::ResourceKind};

/// Tri-state result of one list fetch. `Empty` and `Failed` are
/// presentation-distinct; neither touches the prior snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(Vec<T>),
    Empty,
    Failed(String),
}

/// Fetches and classifies `GET /api/<resource>`. No side effects beyond the
/// network call; slot mutation belongs to the orchestrator.
pub async fn load_list<T: DeserializeOwned>(
    api: &ApiClient,
    kind: ResourceKind,
) -> LoadOutcome<T> {
    let mut envelope = match api.get_json::<ListEnvelope<T>>(kind.path()).await {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(resource = kind.label(), error = %err, "list fetch failed");
            return LoadOutcome::Failed(err.to_string());
        }
    };

    if !envelope.is_success() {
        let reason = envelope
            .message
            .take()
            .unwrap_or_else(|| format!("unexpected application status {:?}", envelope.status));
        warn!(resource = kind.label(), %reason, "list fetch rejected by server");
        return LoadOutcome::Failed(reason);
    }

    match envelope.data {
        Some(records) if !records.is_empty() => LoadOutcome::Loaded(records),
        Some(_) => LoadOutcome::Empty,
        None => {
            warn!(
                resource = kind.label(),
                "success response is missing its data list"
            );
            LoadOutcome::Failed("success response missing data".to_string())
        }
    }
}
