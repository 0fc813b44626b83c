//! Socket.IO intake client
//!
//! Keeps one session with the backend open, reconnecting with a fixed delay
//! whenever it drops. Transport drops are retried by the client itself;
//! server-side disconnects end the session and [`SocketIntake::run`] opens a
//! new one. Both paths wait [`RECONNECT_DELAY`].

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rust_socketio::Event;
use rust_socketio::Payload;
use rust_socketio::asynchronous::{Client, ClientBuilder};
use tokio::sync::{Notify, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::{PRINT_ORDER_EVENT, PrinterRegistration, REGISTER_PRINTER_EVENT, decode_order};
use crate::core::Config;
use crate::order::Order;

/// Delay between reconnection attempts
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Fixed delay for the client's own reconnects after a transport drop
fn reconnect_delay_ms() -> u64 {
    u64::try_from(RECONNECT_DELAY.as_millis()).unwrap_or(u64::MAX)
}

/// Socket.IO intake
pub struct SocketIntake {
    backend_url: String,
    registration: PrinterRegistration,
    orders: mpsc::UnboundedSender<Order>,
}

impl SocketIntake {
    pub fn new(config: &Config, orders: mpsc::UnboundedSender<Order>) -> Self {
        Self {
            backend_url: config.backend_url.clone(),
            registration: PrinterRegistration {
                restaurant_id: config.restaurant_id,
                api_key: config.api_key.clone(),
            },
            orders,
        }
    }

    /// Open a session; `closed` is notified when the backend drops it
    async fn connect(&self, closed: Arc<Notify>) -> anyhow::Result<Client> {
        let registration = serde_json::to_value(&self.registration)?;
        let restaurant_id = self.registration.restaurant_id;

        let on_connect = move |_payload: Payload, client: Client| {
            let registration = Payload::Text(vec![registration.clone()]);
            async move {
                info!(restaurant_id, "Connected to backend, registering printer");
                if let Err(e) = client.emit(REGISTER_PRINTER_EVENT, registration).await {
                    error!(error = %e, "Failed to register printer");
                }
            }
            .boxed()
        };

        let orders = self.orders.clone();
        let on_order = move |payload: Payload, _client: Client| {
            let orders = orders.clone();
            async move {
                match decode_order(payload) {
                    Ok(order) => {
                        info!(
                            order = %order.order_number,
                            items = order.items.len(),
                            "Order received for printing"
                        );
                        if orders.send(order).is_err() {
                            warn!("Print dispatcher is gone, dropping order");
                        }
                    }
                    Err(e) => warn!(error = %e, "Ignoring print event"),
                }
            }
            .boxed()
        };

        let on_close = move |_payload: Payload, _client: Client| {
            let closed = closed.clone();
            async move {
                warn!("Disconnected from backend");
                closed.notify_one();
            }
            .boxed()
        };

        let client = ClientBuilder::new(self.backend_url.as_str())
            .namespace("/")
            .reconnect_delay(reconnect_delay_ms(), reconnect_delay_ms())
            .on(Event::Connect, on_connect)
            .on(PRINT_ORDER_EVENT, on_order)
            .on(Event::Close, on_close)
            .on(Event::Error, |err: Payload, _client: Client| {
                async move { error!(error = ?err, "Socket.IO error") }.boxed()
            })
            .connect()
            .await?;

        Ok(client)
    }

    /// Hold a backend session until shutdown, reconnecting as needed
    pub async fn run(self, shutdown: CancellationToken) {
        info!(backend = %self.backend_url, "Backend intake started");

        loop {
            let closed = Arc::new(Notify::new());
            match self.connect(closed.clone()).await {
                Ok(client) => {
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            if let Err(e) = client.disconnect().await {
                                warn!(error = %e, "Error while disconnecting from backend");
                            }
                            break;
                        }
                        _ = closed.notified() => {}
                    }
                }
                Err(e) => error!(error = %e, "Connection to backend failed"),
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(RECONNECT_DELAY) => {
                    info!("Reconnecting to backend");
                }
            }
        }

        info!("Backend intake stopped");
    }
}
