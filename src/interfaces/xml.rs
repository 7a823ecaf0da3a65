//! `PagadorReturn` response bodies, as the real web service renders them.
//!
//! Everything except the status code and the transaction id is fixed.

use crate::application::scenario::Outcome;
use crate::domain::decision::{AuthorizeDecision, CaptureDecision};

const NAMESPACES: &str = concat!(
    r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
    r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
    r#"xmlns="https://www.pagador.com.br/webservice/pagador""#
);

pub fn authorize_response(order_id: &str, decision: &AuthorizeDecision) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<PagadorReturn {NAMESPACES}>
  <amount>5</amount>
  <message>Transaction Successful</message>
  <authorisationNumber>733610</authorisationNumber>
  <returnCode>7</returnCode>
  <status>{status}</status>
  <transactionId>{transaction_id}</transactionId>
</PagadorReturn>
"#,
        status = decision.status.code(),
        transaction_id = escape(order_id),
    )
}

pub fn capture_response(decision: &CaptureDecision) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<PagadorReturn {NAMESPACES}>
  <amount>2</amount>
  <message>Approved</message>
  <returnCode>0</returnCode>
  <status>{status}</status>
</PagadorReturn>
"#,
        status = decision.status.map(|status| status.code()).unwrap_or(""),
    )
}

/// Renders the response body for a step, if the step is a processor call.
pub fn render(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Authorize { order, decision } => Some(authorize_response(order, decision)),
        Outcome::Capture { decision, .. } => Some(capture_response(decision)),
        Outcome::Amount { .. } | Outcome::Reset => None,
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
