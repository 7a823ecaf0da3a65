use crate::application::gateway::PaymentGateway;
use crate::domain::decision::{AuthorizeDecision, CaptureDecision};
use crate::error::{PagadorError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Authorize,
    Capture,
    /// Order data lookup, answered with the authorized amount.
    Amount,
    /// Clears both ledgers and the order store.
    Reset,
}

/// One call of a scripted client session.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ScenarioStep {
    pub operation: Operation,
    pub order: Option<String>,
    pub card: Option<String>,
    pub amount: Option<String>,
}

/// Result of a single step.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Authorize {
        order: String,
        decision: AuthorizeDecision,
    },
    Capture {
        order: String,
        decision: CaptureDecision,
    },
    Amount {
        order: String,
        amount: String,
    },
    Reset,
}

impl Outcome {
    pub fn operation(&self) -> Operation {
        match self {
            Outcome::Authorize { .. } => Operation::Authorize,
            Outcome::Capture { .. } => Operation::Capture,
            Outcome::Amount { .. } => Operation::Amount,
            Outcome::Reset => Operation::Reset,
        }
    }
}

fn required<'a>(field: &'a Option<String>, name: &str, operation: Operation) -> Result<&'a str> {
    field
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PagadorError::Validation(format!("{operation:?} requires `{name}`")))
}

/// Executes `step` against `gateway`.
pub async fn execute(gateway: &PaymentGateway, step: &ScenarioStep) -> Result<Outcome> {
    match step.operation {
        Operation::Authorize => {
            let order = required(&step.order, "order", step.operation)?;
            let card = required(&step.card, "card", step.operation)?;
            let amount = step.amount.as_deref().unwrap_or_default();
            let decision = gateway.authorize(card, order, amount).await?;
            Ok(Outcome::Authorize {
                order: order.to_string(),
                decision,
            })
        }
        Operation::Capture => {
            let order = required(&step.order, "order", step.operation)?;
            let decision = gateway.capture(order).await?;
            Ok(Outcome::Capture {
                order: order.to_string(),
                decision,
            })
        }
        Operation::Amount => {
            let order = required(&step.order, "order", step.operation)?;
            Ok(Outcome::Amount {
                order: order.to_string(),
                amount: gateway.amount_for(order).await,
            })
        }
        Operation::Reset => {
            gateway.reset().await?;
            Ok(Outcome::Reset)
        }
    }
}
