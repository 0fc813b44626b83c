//! Order receipt renderer
//!
//! Renders an [`Order`] into ESC/POS bytes for thermal printers. Rendering is
//! pure: the only outside input is the clock, which [`ReceiptRenderer::render_at`]
//! takes explicitly.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use snap_printer::{EscPosBuilder, sanitize};

use crate::order::{Order, OrderItem, present};

/// Layout settings for receipts
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Characters per line (58mm: 32, 80mm: 48)
    pub width: usize,
    /// Zone the timestamp is printed in, independent of the host's zone
    pub timezone: Tz,
    /// Unit printed after the total (the colón sign cannot be printed)
    pub currency_label: String,
    /// Last text line of the receipt
    pub closing_message: String,
    /// Blank lines fed before the cut
    pub feed_lines: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: 48,
            timezone: chrono_tz::America::Costa_Rica,
            currency_label: "COLONES".to_string(),
            closing_message: "GRACIAS POR SU COMPRA".to_string(),
            feed_lines: 4,
        }
    }
}

/// Order receipt renderer
pub struct ReceiptRenderer {
    config: RendererConfig,
}

impl ReceiptRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render an order stamped with the current time
    pub fn render(&self, order: &Order) -> Vec<u8> {
        self.render_at(order, Utc::now())
    }

    /// Render an order stamped with `at`
    pub fn render_at(&self, order: &Order, at: DateTime<Utc>) -> Vec<u8> {
        // Reset is emitted by the builder itself.
        let mut b = EscPosBuilder::new(self.config.width);

        self.render_header(&mut b, order, at);
        self.render_customer(&mut b, order);
        b.separator();
        self.render_items(&mut b, &order.items);
        b.separator();
        self.render_comment(&mut b, order);
        b.separator();
        self.render_amounts(&mut b, order);
        b.separator();
        self.render_total(&mut b, order);
        b.separator();
        self.render_footer(&mut b);

        b.build()
    }

    /// Centered header: restaurant, order number, service, timestamp
    fn render_header(&self, b: &mut EscPosBuilder, order: &Order, at: DateTime<Utc>) {
        b.center();
        b.codepage_ascii();

        if let Some(name) = present(&order.restaurant_name) {
            b.line(name);
        }
        b.labeled_line("PEDIDO #", order.order_number.as_str());
        b.line(&service_line(order));
        b.literal_line(&format_timestamp(at, self.config.timezone));
        b.separator();
        b.left();
    }

    fn render_customer(&self, b: &mut EscPosBuilder, order: &Order) {
        if let Some(name) = present(&order.customer_name) {
            b.labeled_line("CLIENTE: ", name);
        }
        if let Some(phone) = present(&order.customer_phone) {
            b.labeled_line("TEL: ", phone);
        }
        if order.is_delivery()
            && let Some(address) = present(&order.delivery_address)
        {
            b.literal_line("DIRECCION:");
            b.line(address);
        }
    }

    /// Item lines: `2x CAFE`, extras indented as `  + LECHE x1`
    fn render_items(&self, b: &mut EscPosBuilder, items: &[OrderItem]) {
        for item in items {
            let name = present(&item.name).unwrap_or("Producto sin nombre");
            let quantity = present(&item.quantity).unwrap_or("1");
            b.line(&format!("{}x {}", quantity, name));

            for extra in &item.extras {
                let extra_name = present(&extra.name).unwrap_or_default();
                let portion = present(&extra.portion).unwrap_or("1");
                b.line(&format!("  + {} x{}", extra_name, portion));
            }
        }
    }

    fn render_comment(&self, b: &mut EscPosBuilder, order: &Order) {
        if let Some(comment) = present(&order.comment) {
            b.literal_line("COMENTARIO:");
            b.line(comment);
        }
    }

    fn render_amounts(&self, b: &mut EscPosBuilder, order: &Order) {
        if let Some(subtotal) = &order.subtotal
            && subtotal.is_numeric()
        {
            b.labeled_line("SUBTOTAL: ", subtotal.as_str());
        }
        if let Some(fee) = &order.delivery_fee
            && fee.is_positive()
        {
            b.labeled_line("ENVIO: ", fee.as_str());
        }
        if let Some(discount) = &order.discount
            && discount.is_positive()
        {
            b.labeled_line("DESCUENTO: -", discount.as_str());
        }
    }

    /// Double-size total followed by the payment method
    fn render_total(&self, b: &mut EscPosBuilder, order: &Order) {
        let total = present(&order.total).unwrap_or_default();

        b.double_size();
        b.line(&total_line(total, &self.config.currency_label));
        b.normal_size();

        if let Some(method) = present(&order.payment_method) {
            b.labeled_line("PAGO: ", method);
        }
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.center();
        b.line(&self.config.closing_message);
        b.feed_lines(self.config.feed_lines);
        b.cut();
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

/// `MESA <table>` for dine-in, otherwise the service type itself
fn service_line(order: &Order) -> String {
    if order.is_dine_in() {
        format!("MESA {}", present(&order.table_number).unwrap_or_default())
    } else {
        present(&order.service_type).unwrap_or_default().to_string()
    }
}

fn total_line(total: &str, currency_label: &str) -> String {
    let total = sanitize(total);
    let label = sanitize(currency_label);
    ["TOTAL:", total.as_str(), label.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a UTC instant as `dd/mm/YYYY HH:MM:SS` in the given zone
fn format_timestamp(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%d/%m/%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderExtra, Scalar};
    use chrono::TimeZone;
    use snap_printer::command::{self, text_lines};

    fn fixed_time() -> DateTime<Utc> {
        // 2024-03-15 18:30:05 UTC = 12:30:05 in Costa Rica (UTC-6)
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 5).unwrap()
    }

    fn s(text: &str) -> Option<Scalar> {
        Some(Scalar::from(text))
    }

    fn create_test_order() -> Order {
        Order {
            order_number: Scalar::from("42"),
            restaurant_name: s("Café Sol"),
            service_type: s("delivery"),
            customer_name: s("María José"),
            customer_phone: s("+506 8888-9999"),
            delivery_address: s("Calle Ñ #5"),
            items: vec![
                OrderItem {
                    name: s("Café"),
                    quantity: s("2"),
                    extras: vec![
                        OrderExtra {
                            name: s("Leche de almendra"),
                            portion: None,
                        },
                        OrderExtra {
                            name: s("Azúcar"),
                            portion: s("2"),
                        },
                    ],
                },
                OrderItem {
                    name: s("Empanada"),
                    quantity: s("1"),
                    extras: vec![],
                },
            ],
            comment: None,
            subtotal: s("3000"),
            delivery_fee: s("500"),
            discount: s("0"),
            total: s("3500"),
            payment_method: s("Efectivo"),
            ..Default::default()
        }
    }

    fn render(order: &Order) -> Vec<String> {
        let renderer = ReceiptRenderer::new(RendererConfig {
            width: 32,
            ..Default::default()
        });
        text_lines(&renderer.render_at(order, fixed_time()))
    }

    fn separator() -> String {
        "-".repeat(32)
    }

    #[test]
    fn test_render_full_receipt_layout() {
        let lines = render(&create_test_order());
        let sep = separator();
        let sep = sep.as_str();

        let expected: Vec<&str> = vec![
            "CAFE SOL",
            "PEDIDO #42",
            "DELIVERY",
            "15/03/2024 12:30:05",
            sep,
            "CLIENTE: MARIA JOSE",
            "TEL: +506 8888-9999",
            "DIRECCION:",
            "CALLE N 5",
            sep,
            "2X CAFE",
            "  + LECHE DE ALMENDRA X1",
            "  + AZUCAR X2",
            "1X EMPANADA",
            sep,
            sep,
            "SUBTOTAL: 3000",
            "ENVIO: 500",
            sep,
            "TOTAL: 3500 COLONES",
            "PAGO: EFECTIVO",
            sep,
            "GRACIAS POR SU COMPRA",
            "",
            "",
            "",
            "",
            "",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_command_sequence() {
        let renderer = ReceiptRenderer::default();
        let data = renderer.render_at(&create_test_order(), fixed_time());

        let mut prefix = Vec::new();
        prefix.extend_from_slice(command::RESET);
        prefix.extend_from_slice(command::ALIGN_CENTER);
        prefix.extend_from_slice(command::CODEPAGE_ASCII);
        assert!(data.starts_with(&prefix));

        let mut total = Vec::new();
        total.extend_from_slice(command::DOUBLE_SIZE);
        total.extend_from_slice(b"TOTAL: 3500 COLONES\n");
        total.extend_from_slice(command::NORMAL_SIZE);
        assert!(data.windows(total.len()).any(|w| w == total.as_slice()));

        let mut tail = Vec::new();
        tail.extend_from_slice(command::ALIGN_CENTER);
        tail.extend_from_slice(b"GRACIAS POR SU COMPRA\n\n\n\n\n");
        tail.extend_from_slice(command::CUT);
        assert!(data.ends_with(&tail));
    }

    #[test]
    fn test_exact_byte_stream() {
        let renderer = ReceiptRenderer::new(RendererConfig {
            width: 32,
            ..Default::default()
        });
        let data = renderer.render_at(&create_test_order(), fixed_time());

        let sep = format!("{}\n", "-".repeat(32));
        let parts: &[&[u8]] = &[
            command::RESET,
            command::ALIGN_CENTER,
            command::CODEPAGE_ASCII,
            b"CAFE SOL\n",
            b"PEDIDO #42\n",
            b"DELIVERY\n",
            b"15/03/2024 12:30:05\n",
            sep.as_bytes(),
            command::ALIGN_LEFT,
            b"CLIENTE: MARIA JOSE\n",
            b"TEL: +506 8888-9999\n",
            b"DIRECCION:\n",
            b"CALLE N 5\n",
            sep.as_bytes(),
            b"2X CAFE\n",
            b"  + LECHE DE ALMENDRA X1\n",
            b"  + AZUCAR X2\n",
            b"1X EMPANADA\n",
            sep.as_bytes(),
            sep.as_bytes(),
            b"SUBTOTAL: 3000\n",
            b"ENVIO: 500\n",
            sep.as_bytes(),
            command::DOUBLE_SIZE,
            b"TOTAL: 3500 COLONES\n",
            command::NORMAL_SIZE,
            b"PAGO: EFECTIVO\n",
            sep.as_bytes(),
            command::ALIGN_CENTER,
            b"GRACIAS POR SU COMPRA\n",
            b"\n\n\n\n",
            command::CUT,
        ];
        assert_eq!(data, parts.concat());
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = ReceiptRenderer::default();
        let order = create_test_order();
        assert_eq!(
            renderer.render_at(&order, fixed_time()),
            renderer.render_at(&order, fixed_time())
        );
    }

    #[test]
    fn test_empty_items() {
        let order = Order {
            order_number: Scalar::from("1"),
            total: s("0"),
            ..Default::default()
        };
        let lines = render(&order);
        let sep = separator();

        assert_eq!(lines[0], "PEDIDO #1");
        // Separator after the customer block is directly followed by the one
        // closing the (empty) item list.
        let first = lines.iter().position(|l| *l == sep).unwrap();
        assert_eq!(lines[first + 1], sep);
        assert_eq!(lines[first + 2], sep);
        assert!(!lines.iter().any(|l| l.contains('X')));

        let data = ReceiptRenderer::default().render_at(&order, fixed_time());
        assert!(data.ends_with(command::CUT));
    }

    #[test]
    fn test_comment_block() {
        let mut order = create_test_order();
        let lines = render(&order);
        assert!(!lines.iter().any(|l| l == "COMENTARIO:"));

        order.comment = s("Extra napkins");
        let lines = render(&order);
        let sep = separator();
        let at = lines.iter().position(|l| l == "COMENTARIO:").unwrap();
        assert_eq!(lines[at - 1], sep);
        assert_eq!(lines[at + 1], "EXTRA NAPKINS");
        assert_eq!(lines[at + 2], sep);
    }

    #[test]
    fn test_dine_in_table() {
        let order = Order {
            order_number: Scalar::from("9"),
            service_type: s("Restaurante"),
            table_number: s("12"),
            ..Default::default()
        };
        let lines = render(&order);
        assert_eq!(lines[1], "MESA 12");

        let order = Order {
            service_type: s("restaurante"),
            ..Default::default()
        };
        assert_eq!(render(&order)[1], "MESA ");
    }

    #[test]
    fn test_delivery_address_only_for_delivery() {
        let mut order = create_test_order();
        assert!(render(&order).iter().any(|l| l == "CALLE N 5"));

        order.service_type = s("pickup");
        let lines = render(&order);
        assert_eq!(lines[2], "PICKUP");
        assert!(!lines.iter().any(|l| l == "DIRECCION:"));
        assert!(!lines.iter().any(|l| l == "CALLE N 5"));
    }

    #[test]
    fn test_amount_gates() {
        let mut order = create_test_order();
        order.subtotal = s("n/a");
        order.delivery_fee = s("0");
        order.discount = s("250.50");

        let lines = render(&order);
        assert!(!lines.iter().any(|l| l.starts_with("SUBTOTAL")));
        assert!(!lines.iter().any(|l| l.starts_with("ENVIO")));
        assert!(lines.iter().any(|l| l == "DESCUENTO: -250.50"));
    }

    #[test]
    fn test_long_amounts_are_not_hidden() {
        let mut order = create_test_order();
        order.subtotal = s("123456789012345678901234567890");
        order.delivery_fee = s("123456789012345678901234567890.50");

        let lines = render(&order);
        assert!(lines.iter().any(|l| l == "SUBTOTAL: 123456789012345678901234567890"));
        assert!(lines.iter().any(|l| l == "ENVIO: 123456789012345678901234567890.50"));
    }

    #[test]
    fn test_non_numeric_total_passes_through() {
        let mut order = create_test_order();
        order.total = s("₡3.500,00");
        assert!(render(&order).iter().any(|l| l == "TOTAL: 3.500,00 COLONES"));
    }

    #[test]
    fn test_item_without_name_or_quantity() {
        let order = Order {
            items: vec![OrderItem::default()],
            ..Default::default()
        };
        assert!(render(&order).iter().any(|l| l == "1X PRODUCTO SIN NOMBRE"));
    }

    #[test]
    fn test_timestamp_uses_configured_zone() {
        assert_eq!(
            format_timestamp(fixed_time(), chrono_tz::America::Costa_Rica),
            "15/03/2024 12:30:05"
        );
        assert_eq!(
            format_timestamp(fixed_time(), chrono_tz::Europe::Madrid),
            "15/03/2024 19:30:05"
        );
    }
}
