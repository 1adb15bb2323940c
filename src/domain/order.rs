use {
    super::document::Document,
    super::event::ShippingAddress,
    super::money::Centavos,
    uuid::Uuid,
};

/// Order row for INSERT — id generated in Rust via Uuid::now_v7().
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub external_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub status_id: i32,
    pub platform: String,
    pub payment_method: String,
    pub payment_external_id: Option<String>,
    pub value_products: Centavos,
    pub value_shipping: Centavos,
    pub value_total: Centavos,
    /// Denormalized snapshot of the chosen shipment quote, if any.
    pub quote: Option<serde_json::Value>,
    pub company_id: Option<i64>,
}

/// Customer row for INSERT, tied back to the order that created it.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id: Uuid,
    pub pedido_id: Uuid,
    pub name: String,
    pub email: String,
    pub document: Document,
    pub phone: Option<String>,
    pub address: Option<ShippingAddress>,
    pub submitted: bool,
}

/// One physical unit of a purchased SKU. Multi-quantity purchases are
/// expanded into N of these before persistence.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub id: Uuid,
    pub pedido_id: Uuid,
    pub produto_id: Uuid,
    pub variante_id: Option<Uuid>,
    pub unit_price: Centavos,
    pub barcode: Option<String>,
}

/// Abandoned-cart lead row for INSERT.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub document: Option<Document>,
    pub phone: Option<String>,
    pub address: Option<ShippingAddress>,
    pub produto_id: Option<Uuid>,
    pub tipo_de_lead_id: i32,
    pub vendido: bool,
    pub substituido: bool,
}

/// What one pass through the ingestion pipeline did.
#[derive(Debug)]
pub enum IngestOutcome {
    /// New order + customer + unit line items written.
    OrderCreated { pedido_id: Uuid },
    /// Upsell appended unit rows to an existing active order.
    ItemsAppended { pedido_id: Uuid, items: usize },
    /// New abandoned-cart lead written.
    LeadCreated { lead_id: Uuid },
    /// Cart reminder dropped — customer already has an active order.
    ActiveOrderExists,
    /// Cart reminder dropped — lead already on file for document/email.
    LeadExists,
    /// PIX waitlist row removed for the order number.
    WaitlistCleared,
    /// PIX approval for an order number not on the waitlist.
    WaitlistMiss,
    /// Event recognized but required no action.
    Ignored,
}
