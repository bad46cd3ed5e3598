use crate::domain::order::Order;
use crate::error::Result;
use std::io::Write;

/// Writes orders as CSV for administrative review.
///
/// One row per order, newest-first as supplied; line items are flattened
/// into a single summary column.
pub struct OrderCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderCsvWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_orders(&mut self, orders: &[Order]) -> Result<()> {
        self.writer.write_record([
            "id",
            "createdAt",
            "status",
            "paymentMethod",
            "paymentId",
            "customerEmail",
            "total",
            "items",
        ])?;

        for order in orders {
            let items: Vec<String> = order
                .items
                .iter()
                .map(|i| format!("{} x{} ({})", i.name, i.quantity, i.size))
                .collect();

            self.writer.write_record([
                order.id.as_str(),
                &order.created_at.to_rfc3339(),
                order.status.as_str(),
                order.payment_method.as_str(),
                order.payment_id.as_deref().unwrap_or(""),
                order.customer_email.as_deref().unwrap_or(""),
                &order.total.to_string(),
                &items.join("; "),
            ])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
