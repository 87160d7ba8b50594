//! Order entity model

use super::status::OrderStatus;
use crate::core::field::{FieldValue, null_as_default};
use crate::core::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supplier order for coconut waste.
///
/// Missing or null numeric fields read as 0 and text as empty, so records
/// from an older or foreign backend still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub waste_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /orders`, after sanitizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub waste_type: String,
    pub quantity: i64,
    pub amount: f64,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

/// Body of `PUT /orders/{id}`: only the fields being changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// One labelled line of a printable order summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub field: String,
    pub value: String,
}

impl Order {
    /// A fresh, unsaved order. The store assigns the id.
    pub fn from_new(new: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: String::new(),
            waste_type: new.waste_type,
            quantity: new.quantity,
            amount: new.amount,
            address: new.address,
            phone_number: new.phone_number,
            email: new.email,
            status: new.status.unwrap_or_default(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn apply(&mut self, patch: OrderPatch, now: DateTime<Utc>) {
        if let Some(waste_type) = patch.waste_type {
            self.waste_type = waste_type;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = Some(now);
    }

    /// Field/value rows of a printable order summary
    pub fn detail_rows(&self) -> Vec<DetailRow> {
        let order_date = self
            .created_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string());

        [
            ("Waste Type", self.waste_type.clone()),
            ("Quantity", self.quantity.to_string()),
            ("Amount", format_rupees(self.amount)),
            ("Status", self.status.label().to_string()),
            ("Order Date", order_date),
            ("Email", self.email.clone()),
            ("Phone Number", self.phone_number.clone()),
            ("Address", self.address.clone()),
        ]
        .into_iter()
        .map(|(field, value)| DetailRow {
            field: field.to_string(),
            value,
        })
        .collect()
    }
}

/// `Rs. 1,234.5`: thousands grouping, at most three decimals, no trailing zeros
pub fn format_rupees(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("Rs. {sign}{grouped}")
    } else {
        format!("Rs. {sign}{grouped}.{fraction}")
    }
}

impl Record for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["wasteType", "email", "phoneNumber", "status"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "_id" | "id" => FieldValue::String(self.id.clone()),
            "wasteType" => FieldValue::String(self.waste_type.clone()),
            "quantity" => FieldValue::Integer(self.quantity),
            "amount" => FieldValue::Float(self.amount),
            "address" => FieldValue::String(self.address.clone()),
            "phoneNumber" => FieldValue::String(self.phone_number.clone()),
            "email" => FieldValue::String(self.email.clone()),
            "status" => FieldValue::String(self.status.label().to_string()),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
