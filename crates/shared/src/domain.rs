use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(ProductId);
id_newtype!(OrderId);

/// Accepts a decimal encoded either as a JSON number or as a string.
/// The backend serializes SQL decimals as strings.
fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// ISO-8601 as emitted by the backend; display-only, so kept raw.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "de_decimal")]
    pub price: f64,
    pub stock_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    #[serde(deserialize_with = "de_decimal")]
    pub total_amount: f64,
    /// Server-enumerated (pending/completed/cancelled/...); opaque to the client.
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_price_accepts_string_or_number() {
        let from_string: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Widget",
            "description": null,
            "price": "19.99",
            "stock_quantity": 4
        }))
        .expect("string price");
        assert_eq!(from_string.price, 19.99);

        let from_number: ProductRecord = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Gadget",
            "price": 5.5,
            "stock_quantity": 0
        }))
        .expect("numeric price");
        assert_eq!(from_number.price, 5.5);
        assert_eq!(from_number.description, None);
    }

    #[test]
    fn user_created_at_may_be_absent() {
        let user: UserRecord = serde_json::from_value(serde_json::json!({
            "id": 7,
            "username": "alice",
            "email": "a@x.com"
        }))
        .expect("user without created_at");
        assert_eq!(user.created_at, None);
    }
}
