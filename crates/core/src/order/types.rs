//! Order submission types and data structures.

use chrono::{DateTime, Utc};
use podorder_shared::types::OrderId;
use serde::{Deserialize, Serialize};

use crate::upload::Attachment;

/// Attachment category of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentCategory {
    /// Print-ready design files.
    Design,
    /// Mockup previews.
    Mockup,
    /// Payment screenshot.
    PaymentProof,
}

impl AttachmentCategory {
    /// Storage namespace segment under `orders/{order_id}/`.
    #[must_use]
    pub fn as_segment(&self) -> &'static str {
        match self {
            Self::Design => "designs",
            Self::Mockup => "mockups",
            Self::PaymentProof => "payment",
        }
    }

    /// Destination namespace for this category of an order.
    #[must_use]
    pub fn namespace_for(&self, order_id: &OrderId) -> String {
        format!("orders/{order_id}/{}", self.as_segment())
    }
}

/// Order lifecycle status. New orders start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, not yet reviewed.
    #[default]
    Pending,
    /// Being processed by staff.
    Processing,
    /// Payment confirmed.
    PaymentConfirmed,
}

impl OrderStatus {
    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::PaymentConfirmed => "payment_confirmed",
        }
    }
}

/// How the order is paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OrderMode {
    /// Paid before dispatch.
    Prepaid,
    /// Cash on delivery for the given amount.
    Cod {
        /// Amount to collect on delivery, as entered.
        amount: String,
    },
}

impl OrderMode {
    /// Convert to database string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prepaid => "Prepaid",
            Self::Cod { .. } => "COD",
        }
    }

    /// Amount to collect on delivery, for COD orders.
    #[must_use]
    pub fn cod_amount(&self) -> Option<&str> {
        match self {
            Self::Prepaid => None,
            Self::Cod { amount } => Some(amount),
        }
    }
}

/// Customer contact and shipping details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,
    /// Brand the merchandise is printed for.
    pub brand_name: String,
    /// Street address.
    pub address: String,
    /// Postal code.
    pub pincode: String,
    /// Phone number (10 digits).
    pub phone: String,
    /// WhatsApp number (10 digits).
    pub whatsapp: String,
}

/// One product line of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name.
    pub product: String,
    /// Garment size.
    pub size: String,
    /// Color, or `custom`.
    pub color: String,
    /// Color name when `color` is `custom`.
    pub custom_color: Option<String>,
    /// Number of pieces.
    pub quantity: u32,
    /// Front print size.
    pub front_print_size: Option<String>,
    /// Back print size.
    pub back_print_size: Option<String>,
    /// Neck label option.
    pub neck_label: Option<String>,
    /// Sleeve print option.
    pub sleeves: Option<String>,
}

impl OrderItem {
    /// Color to record, resolving `custom` to the custom color name.
    #[must_use]
    pub fn effective_color(&self) -> &str {
        if self.color == "custom" {
            self.custom_color.as_deref().unwrap_or_default()
        } else {
            &self.color
        }
    }
}

/// Everything a customer submits for one order.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    /// Customer details.
    pub customer: CustomerDetails,
    /// Free-text payment reference.
    pub payment_info: String,
    /// Payment mode.
    pub mode: OrderMode,
    /// Product lines.
    pub items: Vec<OrderItem>,
    /// Uploaded design files.
    pub design_files: Vec<Attachment>,
    /// Design files hosted elsewhere.
    pub design_links: Vec<String>,
    /// Uploaded mockup files.
    pub mockup_files: Vec<Attachment>,
    /// Mockups hosted elsewhere.
    pub mockup_links: Vec<String>,
    /// Payment screenshot(s).
    pub payment_proof: Vec<Attachment>,
}

/// Order row handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewOrderRecord {
    /// Order ID.
    pub order_id: OrderId,
    /// Customer name.
    pub name: String,
    /// Brand name.
    pub brand_name: String,
    /// Address with pincode appended.
    pub address: String,
    /// Phone number.
    pub phone: String,
    /// WhatsApp number.
    pub whatsapp: String,
    /// Payment reference.
    pub payment_info: String,
    /// Initial status.
    pub status: OrderStatus,
    /// Design locators followed by design links.
    pub design_urls: Vec<String>,
    /// Mockup locators followed by mockup links.
    pub mockup_urls: Vec<String>,
    /// Payment proof locators.
    pub payment_screenshot_urls: Vec<String>,
    /// `Prepaid` or `COD`.
    pub order_mode: String,
    /// COD amount, only for COD orders.
    pub cod_amount: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedOrder {
    /// Generated order ID.
    pub order_id: OrderId,
    /// Design URLs recorded.
    pub design_urls: Vec<String>,
    /// Mockup URLs recorded.
    pub mockup_urls: Vec<String>,
    /// Payment proof URLs recorded.
    pub payment_proof_urls: Vec<String>,
}
