use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserProfile;

const OBJECT_ID_LEN: usize = 24;

/// Order as submitted to `POST /api/orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Order {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self { ingredients }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    Bun,
    Main,
    Sauce,
}

/// Catalog entry from `GET /api/ingredients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IngredientKind,
    pub proteins: u32,
    pub fat: u32,
    pub carbohydrates: u32,
    pub calories: u32,
    pub price: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientsResponse {
    pub success: bool,
    pub data: Vec<Ingredient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Pending,
    Done,
}

/// Order record held by the stub.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub id: String,
    pub ingredients: Vec<String>,
    pub owner_id: Option<String>,
    pub status: OrderStatus,
    pub name: String,
    pub number: u64,
    pub price: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of an order history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub ingredients: Vec<String>,
    pub status: OrderStatus,
    pub name: String,
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&StoredOrder> for OrderSummary {
    fn from(order: &StoredOrder) -> Self {
        Self {
            id: order.id.clone(),
            ingredients: order.ingredients.clone(),
            status: order.status,
            name: order.name.clone(),
            number: order.number,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Body of `GET /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderSummary>,
    pub total: u64,
    pub total_today: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOwner {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Extra order fields returned only to an authorised caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    #[serde(rename = "_id")]
    pub id: String,
    pub ingredients: Vec<Ingredient>,
    pub owner: OrderOwner,
    pub status: OrderStatus,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub number: u64,
    #[serde(flatten)]
    pub details: Option<OrderDetails>,
}

/// Body of a successful `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub name: String,
    pub order: PlacedOrder,
}

/// Whether `id` has the shape of a catalog identifier: 24 hex digits.
pub fn is_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn new_object_id() -> String {
    std::iter::repeat_with(|| {
        char::from_digit(fastrand::u32(..16), 16).unwrap_or('0')
    })
    .take(OBJECT_ID_LEN)
    .collect()
}

/// Display name of a burger: the leading word of each distinct ingredient,
/// in order, followed by "burger".
pub fn burger_name(ingredients: &[&Ingredient]) -> String {
    let mut words: Vec<String> = Vec::new();
    for ingredient in ingredients {
        let Some(word) = ingredient.name.split_whitespace().next() else {
            continue;
        };
        let word = word.to_lowercase();
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words.push("burger".to_string());

    let name = words.join(" ");
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            id: new_object_id(),
            name: name.to_string(),
            kind: IngredientKind::Main,
            proteins: 1,
            fat: 1,
            carbohydrates: 1,
            calories: 1,
            price: 1,
        }
    }

    #[test]
    fn test_object_id_shape() {
        assert!(is_object_id("643d69a5c3f7b9001cfa093c"));
        assert!(!is_object_id("w43d69a5c3f7b9001cfa093c"));
        assert!(!is_object_id("643d69a5c3f7b9001cfa093"));
        assert!(!is_object_id(""));
    }

    #[test]
    fn test_new_object_id_is_valid() {
        for _ in 0..32 {
            assert!(is_object_id(&new_object_id()));
        }
    }

    #[test]
    fn test_burger_name_dedupes_leading_words() {
        let bun = ingredient("Crater bun N-200i");
        let sauce = ingredient("Spicy-X sauce");
        let name = burger_name(&[&bun, &sauce, &bun]);

        assert_eq!(name, "Crater spicy-x burger");
    }

    #[test]
    fn test_anonymous_order_serializes_number_only() {
        let response = OrderCreatedResponse {
            success: true,
            name: "Crater burger".to_string(),
            order: PlacedOrder {
                number: 7,
                details: None,
            },
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["order"], serde_json::json!({ "number": 7 }));
    }

    #[test]
    fn test_order_without_ingredients_field_deserializes_empty() {
        let order: Order = serde_json::from_str("{}").unwrap();
        assert!(order.ingredients.is_empty());
    }
}
