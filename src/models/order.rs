use super::{date_bucket, OrderStatus, Ref, Resource};
use crate::view_model::Facet;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItem {
    /// course / website / design-template / live-class
    #[serde(default, deserialize_with = "super::null_default")]
    pub item_type: String,
    #[serde(default)]
    pub item: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub price: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub user: Option<Ref>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "super::null_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "super::null_default")]
    pub payment_method: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub created_at: String,
}

impl Order {
    pub fn customer(&self) -> &str {
        self.user.as_ref().map(|u| u.label()).unwrap_or("Guest")
    }
}

impl Resource for Order {
    const COLLECTION: &'static str = "orders";
    const LABEL: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        if let Some(user) = &self.user {
            fields.push(user.label());
            if let Some(email) = user.email() {
                fields.push(email);
            }
        }
        if let Some(tx) = &self.transaction_id {
            fields.push(tx.as_str());
        }
        fields
    }

    fn facet(&self, facet: Facet) -> Option<String> {
        match facet {
            Facet::Status => Some(self.status.to_string()),
            Facet::Type => self.items.first().map(|i| i.item_type.clone()),
            Facet::Platform => Some(self.payment_method.clone()),
            Facet::Date => date_bucket(&self.created_at),
            Facet::Category => None,
        }
    }

    fn price(&self) -> Option<f64> {
        Some(self.total_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_contract_deserialize() {
        let json = r#"{
            "_id": "o1",
            "user": {"_id": "u1", "name": "Ada", "email": "ada@example.com"},
            "items": [{"itemType": "course", "item": {"_id": "c1", "title": "Intro"}, "price": 500}],
            "totalAmount": 500,
            "status": "completed",
            "paymentMethod": "stripe",
            "createdAt": "2024-02-10T12:00:00Z"
        }"#;
        let o: Order = serde_json::from_str(json).expect("order should parse");
        assert_eq!(o.customer(), "Ada");
        assert_eq!(o.status, OrderStatus::Completed);
        assert!(o.search_fields().contains(&"ada@example.com"));
        assert_eq!(o.facet(Facet::Type).as_deref(), Some("course"));
        assert_eq!(o.facet(Facet::Platform).as_deref(), Some("stripe"));
    }

    #[test]
    fn test_order_without_user_is_guest() {
        let o: Order = serde_json::from_str(r#"{"_id": "o2"}"#).expect("should parse");
        assert_eq!(o.customer(), "Guest");
        assert_eq!(o.facet(Facet::Type), None);
    }
}
