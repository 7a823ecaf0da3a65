use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const ORDER_ID: &str = "orderId";
pub const AMOUNT: &str = "amount";
pub const CARD_NUMBER: &str = "cardNumber";
pub const STATUS: &str = "status";

pub const STATUS_CAPTURED: &str = "captured";

const CARD_MASK: &str = "************";

/// Raw order attributes as they arrive from the client or the store.
pub type Attributes = BTreeMap<String, String>;

/// Whether the order has a record in the store yet.
///
/// Decides which conditional write `save` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Transient,
    Persisted,
}

/// An order as the wider application stores it.
///
/// The card number is masked and the amount normalized on construction, so
/// the raw card number never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    attributes: Attributes,
    lifecycle: Lifecycle,
}

impl Order {
    pub fn new(mut attributes: Attributes) -> Self {
        if let Some(amount) = attributes.get_mut(AMOUNT) {
            *amount = normalize_amount(amount);
        }
        if let Some(card_number) = attributes.get_mut(CARD_NUMBER) {
            *card_number = mask_card_number(card_number);
        }
        Self {
            attributes,
            lifecycle: Lifecycle::Transient,
        }
    }

    /// Rebuilds an order from attributes read back from the store.
    ///
    /// Masking and normalization run again, so records written by other
    /// clients of the namespace never expose a raw card number.
    pub(crate) fn from_stored(attributes: Attributes) -> Self {
        let mut order = Self::new(attributes);
        order.lifecycle = Lifecycle::Persisted;
        order
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(String::as_str)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.get(ORDER_ID)
    }

    pub fn amount(&self) -> Option<&str> {
        self.get(AMOUNT)
    }

    /// The normalized amount as a decimal, if it parses.
    pub fn amount_value(&self) -> Option<Decimal> {
        self.amount().and_then(|amount| Decimal::from_str(amount).ok())
    }

    pub fn card_number(&self) -> Option<&str> {
        self.get(CARD_NUMBER)
    }

    pub fn status(&self) -> Option<&str> {
        self.get(STATUS)
    }

    pub fn is_captured(&self) -> bool {
        self.status() == Some(STATUS_CAPTURED)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_persisted(&self) -> bool {
        self.lifecycle == Lifecycle::Persisted
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub(crate) fn mark_captured(&mut self) {
        self.attributes
            .insert(STATUS.to_string(), STATUS_CAPTURED.to_string());
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.lifecycle = Lifecycle::Persisted;
    }

    pub(crate) fn replace_attributes(&mut self, attributes: Attributes) {
        *self = Self::from_stored(attributes);
    }
}

/// Uses `.` as decimal separator.
pub fn normalize_amount(amount: &str) -> String {
    amount.replace(',', ".")
}

/// Keeps only the last four characters of `card_number` visible.
pub fn mask_card_number(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let tail: String = if chars.len() >= 4 {
        chars[chars.len() - 4..].iter().collect()
    } else {
        String::new()
    };
    format!("{CARD_MASK}{tail}")
}
