use std::collections::HashMap;

/// What the processor remembers about an authorized order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Card number exactly as presented at authorize time.
    pub card_number: String,
    pub amount: String,
}

/// Request state shared between the authorize and capture calls.
///
/// Not synchronized; hosts that serve requests from several threads wrap it
/// in a lock (see `PaymentGateway`).
#[derive(Debug, Default, Clone)]
pub struct RequestLedger {
    authorized: HashMap<String, LedgerEntry>,
    captured: Vec<String>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an authorization. A repeated order id overwrites the earlier entry.
    pub fn record_authorization(&mut self, order_id: &str, card_number: &str, amount: &str) {
        self.authorized.insert(
            order_id.to_string(),
            LedgerEntry {
                card_number: card_number.to_string(),
                amount: amount.to_string(),
            },
        );
    }

    pub fn record_capture(&mut self, order_id: &str) {
        self.captured.push(order_id.to_string());
    }

    pub fn authorization(&self, order_id: &str) -> Option<&LedgerEntry> {
        self.authorized.get(order_id)
    }

    /// Captured order ids in capture order, repeats included.
    pub fn captured(&self) -> &[String] {
        &self.captured
    }

    pub fn clear_authorized(&mut self) {
        self.authorized.clear();
    }

    pub fn clear_captured(&mut self) {
        self.captured.clear();
    }
}
