//! Backend event intake
//!
//! The backend pushes orders over Socket.IO. The intake registers this printer
//! on every connect and forwards each order into the dispatcher's channel.
//!
//! | Direction | Event | Payload |
//! |-----------|-------|---------|
//! | out | `registrarImpresora` | [`PrinterRegistration`] |
//! | in  | `printPedido` | [`Order`] |

pub mod socket;

use rust_socketio::Payload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::order::Order;

pub use socket::SocketIntake;

/// Event carrying an order to print
pub const PRINT_ORDER_EVENT: &str = "printPedido";
/// Event registering this printer with the backend
pub const REGISTER_PRINTER_EVENT: &str = "registrarImpresora";

/// Printer registration sent after each connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterRegistration {
    #[serde(rename = "restauranteId")]
    pub restaurant_id: i64,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Empty event payload")]
    EmptyPayload,

    #[error("Unsupported payload type")]
    UnsupportedPayload,

    #[error("Malformed order: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode the order carried by a `printPedido` event
///
/// The backend emits the order as the first event argument.
pub fn decode_order(payload: Payload) -> Result<Order, IntakeError> {
    match payload {
        Payload::Text(values) => {
            let value = values.into_iter().next().ok_or(IntakeError::EmptyPayload)?;
            Ok(serde_json::from_value(value)?)
        }
        _ => Err(IntakeError::UnsupportedPayload),
    }
}
