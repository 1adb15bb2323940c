//! Wire format of the marketplace webhooks and its conversion into the
//! validated domain events. This is the single parsing boundary: nothing
//! past this module touches raw JSON.

use {
    crate::domain::{
        document::Document,
        error::PipelineError,
        event::{
            CartEvent, CustomerInfo, OrderEvent, PaymentInfo, PixEvent, PurchasedItem,
            ShippingAddress, Totals,
        },
        id::{Cep, OrderNumber, Sku},
        money::Centavos,
    },
    serde::Deserialize,
};

/// Outer envelope shared by every event category.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    pub event: String,
    #[serde(default)]
    pub resource: serde_json::Value,
}

/// The platform nests related records under a `data` wrapper.
#[derive(Debug, Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Num(u64),
    Str(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            Self::Num(n) => n.to_string(),
            Self::Str(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrderResource {
    number: NumberOrString,
    #[serde(default)]
    has_upsell: bool,
    customer: Data<CustomerWire>,
    shipping_address: Data<AddressWire>,
    items: Data<Vec<ItemWire>>,
    #[serde(default)]
    payments: Vec<PaymentWire>,
    #[serde(default)]
    value_products: f64,
    #[serde(default)]
    value_shipment: f64,
}

#[derive(Debug, Deserialize)]
struct CartResource {
    customer: Data<CustomerWire>,
    #[serde(default)]
    shipping_address: Option<Data<AddressWire>>,
    items: Data<Vec<ItemWire>>,
}

#[derive(Debug, Deserialize)]
struct PixResource {
    #[serde(alias = "number")]
    order_number: NumberOrString,
    status: String,
}

#[derive(Debug, Deserialize)]
struct CustomerWire {
    name: Option<String>,
    email: Option<String>,
    cpf: Option<String>,
    cnpj: Option<String>,
    phone: Option<PhoneWire>,
}

#[derive(Debug, Deserialize)]
struct PhoneWire {
    full_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddressWire {
    zip_code: Option<String>,
    street: Option<String>,
    number: Option<String>,
    complement: Option<String>,
    neighborhood: Option<String>,
    city: Option<String>,
    uf: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemWire {
    #[serde(default = "default_quantity")]
    quantity: u32,
    #[serde(default)]
    price: f64,
    sku: Option<Data<SkuWire>>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct SkuWire {
    sku: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentWire {
    name: Option<String>,
    transaction_id: Option<String>,
}

pub fn parse_order(resource: serde_json::Value) -> Result<OrderEvent, PipelineError> {
    let wire: OrderResource = serde_json::from_value(resource)
        .map_err(|e| PipelineError::Validation(format!("malformed order resource: {e}")))?;

    let customer = convert_customer(wire.customer.data)?;
    let address = convert_address(wire.shipping_address.data)?;
    let items = convert_items(wire.items.data)?;

    if items.is_empty() {
        return Err(PipelineError::Validation(
            "order has no purchasable items".into(),
        ));
    }

    let payment = wire
        .payments
        .into_iter()
        .next()
        .map(|p| PaymentInfo {
            method: p.name.unwrap_or_else(|| "desconhecido".to_string()),
            external_payment_id: p.transaction_id,
        })
        .unwrap_or(PaymentInfo {
            method: "desconhecido".to_string(),
            external_payment_id: None,
        });

    Ok(OrderEvent {
        number: OrderNumber::new(wire.number.into_string())?,
        upsell: wire.has_upsell,
        customer,
        address,
        items,
        payment,
        totals: Totals {
            products: Centavos::from_reais(wire.value_products)?,
            shipping: Centavos::from_reais(wire.value_shipment)?,
        },
    })
}

pub fn parse_cart(resource: serde_json::Value) -> Result<CartEvent, PipelineError> {
    let wire: CartResource = serde_json::from_value(resource)
        .map_err(|e| PipelineError::Validation(format!("malformed cart resource: {e}")))?;

    let customer = convert_customer(wire.customer.data)?;
    // Abandoned carts often lack a complete address; keep what parses.
    let address = wire
        .shipping_address
        .and_then(|a| convert_address(a.data).ok());
    let items = convert_items(wire.items.data)?;

    Ok(CartEvent {
        customer,
        address,
        items,
    })
}

pub fn parse_pix(resource: serde_json::Value) -> Result<PixEvent, PipelineError> {
    let wire: PixResource = serde_json::from_value(resource)
        .map_err(|e| PipelineError::Validation(format!("malformed pix resource: {e}")))?;

    Ok(PixEvent {
        order_number: OrderNumber::new(wire.order_number.into_string())?,
        approved: matches!(wire.status.as_str(), "approved" | "paid"),
    })
}

fn convert_customer(wire: CustomerWire) -> Result<CustomerInfo, PipelineError> {
    let name = wire
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| PipelineError::Validation("missing customer name".into()))?;
    let email = wire
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| PipelineError::Validation("missing customer email".into()))?;

    // CPF takes precedence when the payload carries both fields.
    let document = match (non_empty(wire.cpf), non_empty(wire.cnpj)) {
        (Some(cpf), _) => Document::new(&cpf)?,
        (None, Some(cnpj)) => Document::new(&cnpj)?,
        (None, None) => {
            return Err(PipelineError::Validation(
                "missing customer document (cpf/cnpj)".into(),
            ));
        }
    };

    Ok(CustomerInfo {
        name,
        email,
        document,
        phone: wire.phone.and_then(|p| non_empty(p.full_number)),
    })
}

fn convert_address(wire: AddressWire) -> Result<ShippingAddress, PipelineError> {
    let cep = wire
        .zip_code
        .ok_or_else(|| PipelineError::Validation("missing shipping zip code".into()))
        .and_then(Cep::new)?;

    Ok(ShippingAddress {
        cep,
        street: wire.street.unwrap_or_default(),
        number: non_empty(wire.number),
        complement: non_empty(wire.complement),
        district: non_empty(wire.neighborhood),
        city: wire.city.unwrap_or_default(),
        state: wire.uf.unwrap_or_default(),
    })
}

fn convert_items(wire: Vec<ItemWire>) -> Result<Vec<PurchasedItem>, PipelineError> {
    let mut items = Vec::with_capacity(wire.len());
    for item in wire {
        // Items without a SKU cannot be resolved or priced; skip them the
        // way the platform's own exports do.
        let Some(sku) = item.sku.and_then(|s| s.data.sku).filter(|s| !s.trim().is_empty())
        else {
            continue;
        };
        if item.quantity == 0 {
            return Err(PipelineError::Validation(format!(
                "item {sku} has zero quantity"
            )));
        }
        items.push(PurchasedItem {
            sku: Sku::new(sku)?,
            quantity: item.quantity,
            unit_price: Centavos::from_reais(item.price)?,
        });
    }
    Ok(items)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
