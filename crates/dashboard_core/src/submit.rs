use std::{fmt::Display, str::FromStr};

use serde::Serialize;
use shared::{
    domain::{ProductId, UserId},
    protocol::{MutationEnvelope, NewOrder, NewOrderItem, NewProduct, NewUser},
};
use tracing::{info, warn};

use crate::{error::ApiError, http::ApiClient, refresh::RefreshOrchestrator, state::ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(String),
}

/// Form inputs carry fields as entered. The only local validation is the
/// parse needed to build the wire payload; everything else is the server's
/// call.
#[derive(Debug, Clone)]
pub struct UserForm {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    pub user_id: String,
    pub product_id: String,
    pub quantity: String,
}

fn parse_field<T>(field: &'static str, raw: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse::<T>().map_err(|err| ApiError::Validation {
        field,
        reason: err.to_string(),
    })
}

impl UserForm {
    fn into_payload(self) -> NewUser {
        NewUser {
            username: self.username,
            email: self.email,
        }
    }
}

impl ProductForm {
    fn into_payload(self) -> Result<NewProduct, ApiError> {
        let price = parse_field("price", &self.price)?;
        let stock_quantity = parse_field("stock_quantity", &self.stock_quantity)?;
        let description = if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description)
        };
        Ok(NewProduct {
            name: self.name,
            description,
            price,
            stock_quantity,
        })
    }
}

impl OrderForm {
    /// The form carries exactly one line item even though the wire payload
    /// is a list; see the order-items note in DESIGN.md.
    fn into_payload(self) -> Result<NewOrder, ApiError> {
        let user_id: i64 = parse_field("user_id", &self.user_id)?;
        let product_id: i64 = parse_field("product_id", &self.product_id)?;
        let quantity = parse_field("quantity", &self.quantity)?;
        Ok(NewOrder {
            user_id: UserId(user_id),
            items: vec![NewOrderItem {
                product_id: ProductId(product_id),
                quantity,
            }],
        })
    }
}

pub async fn submit_user(orchestrator: &RefreshOrchestrator, form: UserForm) -> SubmitOutcome {
    post_and_reload(orchestrator, ResourceKind::Users, &form.into_payload()).await
}

pub async fn submit_product(
    orchestrator: &RefreshOrchestrator,
    form: ProductForm,
) -> SubmitOutcome {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "product form rejected before submission");
            return SubmitOutcome::Rejected(err.to_string());
        }
    };
    post_and_reload(orchestrator, ResourceKind::Products, &payload).await
}

pub async fn submit_order(orchestrator: &RefreshOrchestrator, form: OrderForm) -> SubmitOutcome {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "order form rejected before submission");
            return SubmitOutcome::Rejected(err.to_string());
        }
    };
    post_and_reload(orchestrator, ResourceKind::Orders, &payload).await
}

async fn post_accepting<B: Serialize>(
    api: &ApiClient,
    kind: ResourceKind,
    payload: &B,
) -> Result<(), ApiError> {
    let envelope: MutationEnvelope = api.post_json(kind.path(), payload).await?;
    if !envelope.is_success() {
        return Err(ApiError::Application(envelope.message.unwrap_or_else(
            || format!("failed to add {}", kind.singular()),
        )));
    }
    Ok(())
}

/// POSTs the payload; on acceptance triggers the targeted reload plus stats
/// recomputation. A rejection never mutates the snapshot.
async fn post_and_reload<B: Serialize>(
    orchestrator: &RefreshOrchestrator,
    kind: ResourceKind,
    payload: &B,
) -> SubmitOutcome {
    match post_accepting(orchestrator.api(), kind, payload).await {
        Ok(()) => {
            info!(resource = kind.label(), "submission accepted; reloading");
            orchestrator.refresh_resource(kind).await;
            SubmitOutcome::Accepted
        }
        // The server-supplied message goes to the caller verbatim.
        Err(ApiError::Application(message)) => {
            warn!(resource = kind.label(), %message, "submission rejected by server");
            SubmitOutcome::Rejected(message)
        }
        Err(err) => {
            warn!(resource = kind.label(), error = %err, "submission failed");
            SubmitOutcome::Rejected(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_form_parses_numeric_fields() {
        let payload = ProductForm {
            name: "Widget".into(),
            description: "  ".into(),
            price: " 19.99 ".into(),
            stock_quantity: "4".into(),
        }
        .into_payload()
        .expect("valid form");
        assert_eq!(payload.price, 19.99);
        assert_eq!(payload.stock_quantity, 4);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn product_form_rejects_unparseable_price() {
        let err = ProductForm {
            name: "Widget".into(),
            description: String::new(),
            price: "free".into(),
            stock_quantity: "4".into(),
        }
        .into_payload()
        .expect_err("price must not parse");
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn order_form_builds_single_item_payload() {
        let payload = OrderForm {
            user_id: "3".into(),
            product_id: "9".into(),
            quantity: "2".into(),
        }
        .into_payload()
        .expect("valid form");
        assert_eq!(payload.user_id, UserId(3));
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].product_id, ProductId(9));
        assert_eq!(payload.items[0].quantity, 2);
    }
}
