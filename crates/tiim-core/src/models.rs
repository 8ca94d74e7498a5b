use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A pharmacy's stocked, priced instance of a medicine, as returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryResult {
    pub inventory_id: String,
    pub medicine_name: String,
    /// International non-proprietary (generic) name.
    #[serde(default)]
    pub dci: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub pharmacy_id: String,
    pub pharmacy_name: String,
    #[serde(default)]
    pub pharmacy_address: String,
    pub price: Decimal,
    /// Only present when the search carried coordinates.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// A pharmacy as listed by `/api/pharmacies`.
///
/// Entries missing either coordinate are still valid; they are simply not
/// placed on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    #[serde(default)]
    pub id: Option<String>,
    /// Document id used by some backend deployments in place of `id`.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Pharmacy {
    /// Preferred identifier: `_id`, then `id`.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.object_id.as_deref().or(self.id.as_deref())
    }

    /// Name shown to the user, falling back to `pharmacy_name`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.pharmacy_name.as_deref())
            .unwrap_or_default()
    }

    /// Both coordinates, or `None` when either is missing.
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Delivery,
    /// In-store pickup ("Click & Collect").
    ClickCollect,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Delivery => write!(f, "delivery"),
            DeliveryMethod::ClickCollect => write!(f, "click_collect"),
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" | "livraison" => Ok(DeliveryMethod::Delivery),
            "click_collect" | "click-collect" | "collect" | "retrait" => {
                Ok(DeliveryMethod::ClickCollect)
            }
            other => Err(format!(
                "unknown delivery method '{other}'; expected 'delivery' or 'click_collect'"
            )),
        }
    }
}

/// One line of an outgoing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub inventory_id: String,
    pub medicine_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    pub requires_prescription: bool,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_name: String,
    pub user_phone: String,
    pub pharmacy_id: String,
    pub items: Vec<OrderItem>,
    pub delivery_method: DeliveryMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_url: Option<String>,
}

/// The part of the backend's order response this client reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderResult {
    pub status: String,
    pub total_amount: Decimal,
}
