//! Domain types and pure business rules for the storefront: orders,
//! products, governorates, shipping fees, phone validation and display
//! formatting. Everything in this crate is side-effect free so it can be
//! shared between the service and its tests.

pub mod format;
pub mod governorate;
pub mod order;
pub mod phone;
pub mod pricing;
pub mod product;

/// Site-wide defaults. The service arguments can override the contact
/// numbers, everything else is fixed copy.
pub mod site {
    pub const SITE_NAME: &str = "سندرين بيوتي";
    pub const SUPPORT_PHONE: &str = "01556133633";
    /// WhatsApp destination in international format (no leading `+`).
    pub const WHATSAPP_PHONE: &str = "201556133633";
    pub const CURRENCY: &str = "ج.م";
}
