//! Order model as pushed by the backend
//!
//! Field names on the wire are the backend's (`numero_orden`, `productos`, ...).
//! camelCase English aliases are accepted as well.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dine-in service keyword
pub const SERVICE_DINE_IN: &str = "restaurante";
/// Delivery service keyword
pub const SERVICE_DELIVERY: &str = "delivery";

/// A JSON string or number kept as its exact text
///
/// Amounts, quantities and identifiers arrive either as numbers or strings.
/// The text is never reformatted; numeric checks go through [`Decimal`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact decimal value, if the text is a number `Decimal` can hold
    pub fn decimal(&self) -> Option<Decimal> {
        let text = self.0.trim();
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }

    /// Sign of the number, including plain numbers too long for `Decimal`
    pub fn sign(&self) -> Option<Ordering> {
        match self.decimal() {
            Some(d) => Some(d.cmp(&Decimal::ZERO)),
            None => plain_number_sign(self.0.trim()),
        }
    }

    /// True when the text is a number
    pub fn is_numeric(&self) -> bool {
        self.sign().is_some()
    }

    /// True when the text is a number greater than zero
    pub fn is_positive(&self) -> bool {
        self.sign() == Some(Ordering::Greater)
    }
}

/// Sign of `[+-]digits[.digits]`, or `None` if the text is not of that form
fn plain_number_sign(text: &str) -> Option<Ordering> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let nonzero = int.bytes().chain(frac.bytes()).any(|b| b != b'0');
    Some(match (nonzero, negative) {
        (false, _) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Less,
    })
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde_json::Value;

        let text = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(Self(text))
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extra added to a product (e.g. "extra queso")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderExtra {
    #[serde(rename = "nombre", alias = "name", default)]
    pub name: Option<Scalar>,
    #[serde(rename = "porcion", alias = "portion", default)]
    pub portion: Option<Scalar>,
}

/// Ordered product line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "nombre", alias = "name", default)]
    pub name: Option<Scalar>,
    #[serde(rename = "cantidad", alias = "quantity", default)]
    pub quantity: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extras: Vec<OrderExtra>,
}

/// Order print request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "numero_orden", alias = "orderNumber", default)]
    pub order_number: Scalar,
    #[serde(rename = "restaurante", alias = "restaurantName", default)]
    pub restaurant_name: Option<Scalar>,
    #[serde(rename = "tipo_servicio", alias = "serviceType", default)]
    pub service_type: Option<Scalar>,
    #[serde(rename = "mesa", alias = "tableNumber", default)]
    pub table_number: Option<Scalar>,
    #[serde(rename = "cliente", alias = "customerName", default)]
    pub customer_name: Option<Scalar>,
    #[serde(rename = "telefono", alias = "customerPhone", default)]
    pub customer_phone: Option<Scalar>,
    #[serde(rename = "direccion", alias = "deliveryAddress", default)]
    pub delivery_address: Option<Scalar>,
    #[serde(
        rename = "productos",
        alias = "items",
        default,
        deserialize_with = "null_as_default"
    )]
    pub items: Vec<OrderItem>,
    #[serde(rename = "comentario", alias = "comment", default)]
    pub comment: Option<Scalar>,
    #[serde(default)]
    pub subtotal: Option<Scalar>,
    #[serde(rename = "costo_envio", alias = "deliveryFee", default)]
    pub delivery_fee: Option<Scalar>,
    #[serde(rename = "descuento", alias = "discount", default)]
    pub discount: Option<Scalar>,
    #[serde(default)]
    pub total: Option<Scalar>,
    #[serde(rename = "metodo_pago", alias = "paymentMethod", default)]
    pub payment_method: Option<Scalar>,
}

/// A field counts as present when it is set and not the empty string
pub fn present(field: &Option<Scalar>) -> Option<&str> {
    field.as_ref().map(Scalar::as_str).filter(|s| !s.is_empty())
}

impl Order {
    fn service_is(&self, keyword: &str) -> bool {
        self.service_type
            .as_ref()
            .is_some_and(|s| s.as_str().trim().eq_ignore_ascii_case(keyword))
    }

    pub fn is_dine_in(&self) -> bool {
        self.service_is(SERVICE_DINE_IN)
    }

    pub fn is_delivery(&self) -> bool {
        self.service_is(SERVICE_DELIVERY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_backend_payload() {
        let order: Order = serde_json::from_value(json!({
            "numero_orden": 42,
            "restaurante": "Café Sol",
            "tipo_servicio": "Delivery",
            "direccion": "Calle Ñ #5",
            "productos": [
                { "nombre": "Café", "cantidad": 2, "extras": [{ "nombre": "Leche" }] }
            ],
            "subtotal": 3000,
            "costo_envio": "500",
            "descuento": 0,
            "total": 3500.5
        }))
        .unwrap();

        assert_eq!(order.order_number.as_str(), "42");
        assert!(order.is_delivery());
        assert!(!order.is_dine_in());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity.as_ref().unwrap().as_str(), "2");
        assert_eq!(order.items[0].extras[0].portion, None);
        assert_eq!(order.total.as_ref().unwrap().as_str(), "3500.5");
        assert!(order.delivery_fee.as_ref().unwrap().is_positive());
        assert!(!order.discount.as_ref().unwrap().is_positive());
    }

    #[test]
    fn test_missing_and_null_items() {
        let order: Order = serde_json::from_value(json!({ "numero_orden": "7" })).unwrap();
        assert!(order.items.is_empty());

        let order: Order =
            serde_json::from_value(json!({ "numero_orden": "7", "productos": null })).unwrap();
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_camel_case_aliases() {
        let order: Order = serde_json::from_value(json!({
            "orderNumber": "A-1",
            "serviceType": "RESTAURANTE",
            "tableNumber": 12,
            "items": [{ "name": "Té", "quantity": "1" }]
        }))
        .unwrap();

        assert_eq!(order.order_number.as_str(), "A-1");
        assert!(order.is_dine_in());
        assert_eq!(order.table_number.unwrap().as_str(), "12");
        assert_eq!(order.items[0].name.as_ref().unwrap().as_str(), "Té");
    }

    #[test]
    fn test_scalar_decimal() {
        assert_eq!(Scalar::from("3500").decimal(), Some(Decimal::new(3500, 0)));
        assert_eq!(Scalar::from("12.50").decimal(), Some(Decimal::new(1250, 2)));
        assert_eq!(Scalar::from("12.50").to_string(), "12.50");
        assert!(Scalar::from("abc").decimal().is_none());
        assert!(!Scalar::from("-1").is_positive());
        assert!(Scalar::from("0.01").is_positive());
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let order: Order = serde_json::from_str(
            r#"{
                "numero_orden": 7,
                "subtotal": 12.50,
                "total": 3500.0,
                "costo_envio": 1e3,
                "descuento": 1234567890123456789012345
            }"#,
        )
        .unwrap();

        assert_eq!(order.subtotal.as_ref().unwrap().as_str(), "12.50");
        assert_eq!(order.total.as_ref().unwrap().as_str(), "3500.0");
        assert_eq!(order.delivery_fee.as_ref().unwrap().as_str(), "1e3");
        assert_eq!(
            order.discount.as_ref().unwrap().as_str(),
            "1234567890123456789012345"
        );

        assert!(order.delivery_fee.as_ref().unwrap().is_positive());
        assert!(order.discount.as_ref().unwrap().is_positive());
    }

    #[test]
    fn test_long_numbers_beyond_decimal_range() {
        let long = Scalar::from("123456789012345678901234567890.5");
        assert!(long.decimal().is_none());
        assert!(long.is_numeric());
        assert!(long.is_positive());

        assert_eq!(
            Scalar::from("-000000000000000000000000000000000.1").sign(),
            Some(Ordering::Less)
        );
        assert_eq!(
            Scalar::from("0000000000000000000000000000000000.000").sign(),
            Some(Ordering::Equal)
        );
        assert!(!Scalar::from("12.3.4").is_numeric());
        assert!(!Scalar::from("-").is_numeric());
        assert!(!Scalar::from(".").is_numeric());
        assert!(!Scalar::from("").is_numeric());
    }

    #[test]
    fn test_present_skips_empty() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some(Scalar::from(""))), None);
        assert_eq!(present(&Some(Scalar::from("x"))), Some("x"));
    }
}
