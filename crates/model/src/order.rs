//! Order types as they appear on the wire and in the admin listing.

use {
    chrono::{DateTime, NaiveDate, Utc},
    serde::{Deserialize, Serialize},
};

pub type OrderId = i64;

/// Lifecycle state of an order. The set is closed: the repository boundary
/// rejects any string outside of it, and the wire representation is the
/// Arabic label shown in the admin table.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::VariantArray,
)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "جديد")]
    #[strum(serialize = "جديد")]
    New,
    #[serde(rename = "قيد التجهيز")]
    #[strum(serialize = "قيد التجهيز")]
    Preparing,
    #[serde(rename = "تم الشحن")]
    #[strum(serialize = "تم الشحن")]
    Shipped,
    #[serde(rename = "تم التوصيل")]
    #[strum(serialize = "تم التوصيل")]
    Delivered,
    #[serde(rename = "ملغي")]
    #[strum(serialize = "ملغي")]
    Cancelled,
}

/// An order as returned by the service. Timestamps and the identifier are
/// assigned by the database; `total_amount` is fixed at creation.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub governorate: Option<String>,
    pub notes: Option<String>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields a customer submits through the order form.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct OrderCreation {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub governorate: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Admin listing filter. Both predicates must hold for a row to be
/// included; an absent field does not constrain the result.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct OrderFilter {
    /// Case-insensitive substring match on customer name, phone or address.
    pub search: Option<String>,
    /// Exact status match. `None` corresponds to the "all" selection.
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                order.customer_name.to_lowercase().contains(&term)
                    || order.phone.contains(&term)
                    || order.address.to_lowercase().contains(&term)
            }
        };
        let matches_status = match self.status {
            None => true,
            Some(status) => order.status == status,
        };
        matches_search && matches_status
    }
}
