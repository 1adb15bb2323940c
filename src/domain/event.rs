use {
    super::document::Document,
    super::id::{Cep, OrderNumber, Sku},
    super::money::Centavos,
};

/// Webhook event categories this service acts on. Anything else is
/// acknowledged with a 200 no-op so the sender stops retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    OrderPaid,
    CartReminder,
    PixStatusChanged,
}

impl EventKind {
    /// Pure classification over the payload's declared `event` field.
    /// Upsell detection is separate — it lives on the order resource itself.
    pub fn classify(event: &str) -> Option<Self> {
        match event {
            "order.paid" => Some(Self::OrderPaid),
            "cart.reminder" => Some(Self::CartReminder),
            "pix.status_changed" => Some(Self::PixStatusChanged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub document: Document,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShippingAddress {
    pub cep: Cep,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub state: String,
}

/// One purchased SKU line as declared by the platform. Quantity is the
/// declared count; expansion into unit rows happens at persistence.
#[derive(Debug, Clone)]
pub struct PurchasedItem {
    pub sku: Sku,
    pub quantity: u32,
    pub unit_price: Centavos,
}

#[derive(Debug, Clone)]
pub struct PaymentInfo {
    pub method: String,
    pub external_payment_id: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Totals {
    pub products: Centavos,
    pub shipping: Centavos,
}

impl Totals {
    pub fn total(&self) -> Centavos {
        self.products
            .checked_add(self.shipping)
            .unwrap_or(self.products)
    }
}

/// Validated `order.paid` resource. All downstream steps operate on this
/// type; raw JSON never crosses the parsing boundary.
#[derive(Debug, Clone)]
pub struct OrderEvent {
    pub number: OrderNumber,
    pub upsell: bool,
    pub customer: CustomerInfo,
    pub address: ShippingAddress,
    pub items: Vec<PurchasedItem>,
    pub payment: PaymentInfo,
    pub totals: Totals,
}

/// Validated `cart.reminder` resource. The address is best-effort: abandoned
/// carts frequently lack one.
#[derive(Debug, Clone)]
pub struct CartEvent {
    pub customer: CustomerInfo,
    pub address: Option<ShippingAddress>,
    pub items: Vec<PurchasedItem>,
}

/// Validated `pix.status_changed` resource.
#[derive(Debug, Clone)]
pub struct PixEvent {
    pub order_number: OrderNumber,
    pub approved: bool,
}
