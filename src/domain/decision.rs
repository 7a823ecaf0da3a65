//! Authorize/capture decisioning over the [`RequestLedger`].
//!
//! Outcomes depend only on the card number: the one presented at authorize
//! time, and for capture the one recorded in the ledger for that order.

use super::card::CardProfile;
use super::ledger::RequestLedger;
use super::status::{AuthorizeCode, AuthorizeStatus, CaptureStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizeDecision {
    pub succeeded: bool,
    pub status: AuthorizeCode,
    /// Set when the processor also captured the order during the authorize call.
    pub captured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDecision {
    pub succeeded: bool,
    /// `None` when the outcome is unknown: the order was never authorized or
    /// its card has no capture behavior.
    pub status: Option<CaptureStatus>,
}

/// Status the processor reports for an authorize call with `card`.
pub fn authorize_status(card: Option<CardProfile>) -> AuthorizeCode {
    match card {
        Some(CardProfile::AuthorizeAndCaptureOk) => {
            AuthorizeCode::Capture(CaptureStatus::Captured)
        }
        Some(CardProfile::AuthorizeAndCaptureDenied) => {
            AuthorizeCode::Capture(CaptureStatus::Denied)
        }
        Some(CardProfile::AuthorizeOk | CardProfile::CaptureOk | CardProfile::CaptureDenied) => {
            AuthorizeCode::Authorize(AuthorizeStatus::Authorized)
        }
        Some(CardProfile::AuthorizeDenied) | None => {
            AuthorizeCode::Authorize(AuthorizeStatus::Denied)
        }
    }
}

/// Status the processor reports when capturing an order authorized with `card`.
pub fn capture_status(card: Option<CardProfile>) -> Option<CaptureStatus> {
    match card? {
        CardProfile::CaptureOk | CardProfile::AuthorizeAndCaptureOk => {
            Some(CaptureStatus::Captured)
        }
        CardProfile::CaptureDenied | CardProfile::AuthorizeAndCaptureDenied => {
            Some(CaptureStatus::Denied)
        }
        CardProfile::AuthorizeOk | CardProfile::AuthorizeDenied => None,
    }
}

/// Decides an authorize call without touching the ledger.
pub fn decide_authorize(card_number: &str) -> AuthorizeDecision {
    let card = CardProfile::classify(card_number);
    AuthorizeDecision {
        succeeded: card.is_some_and(|profile| profile != CardProfile::AuthorizeDenied),
        status: authorize_status(card),
        captured: card == Some(CardProfile::AuthorizeAndCaptureOk),
    }
}

/// Records the effects of an authorize `decision` in the ledger.
pub fn record_authorize(
    ledger: &mut RequestLedger,
    decision: &AuthorizeDecision,
    card_number: &str,
    order_id: &str,
    amount: &str,
) {
    if decision.succeeded {
        ledger.record_authorization(order_id, card_number, amount);
    }
    if decision.captured {
        ledger.record_capture(order_id);
    }
}

/// Decides an authorize call and records the authorization on success.
pub fn authorize(
    ledger: &mut RequestLedger,
    card_number: &str,
    order_id: &str,
    amount: &str,
) -> AuthorizeDecision {
    let decision = decide_authorize(card_number);
    record_authorize(ledger, &decision, card_number, order_id, amount);
    decision
}

/// Decides a capture call from the authorization recorded for `order_id`.
pub fn capture(ledger: &mut RequestLedger, order_id: &str) -> CaptureDecision {
    let status = ledger
        .authorization(order_id)
        .and_then(|entry| capture_status(CardProfile::classify(&entry.card_number)));
    let succeeded = status == Some(CaptureStatus::Captured);

    if succeeded {
        ledger.record_capture(order_id);
    }

    CaptureDecision { succeeded, status }
}

/// Amount authorized for `order_id` with `.` as decimal separator, or an
/// empty string when the order was never authorized.
pub fn amount_for(ledger: &RequestLedger, order_id: &str) -> String {
    ledger
        .authorization(order_id)
        .map(|entry| entry.amount.replace(',', "."))
        .unwrap_or_default()
}
