use crate::application::scenario::{Operation, Outcome};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    operation: Operation,
    order: &'a str,
    succeeded: Option<bool>,
    status: &'a str,
    amount: &'a str,
}

impl<'a> From<&'a Outcome> for OutcomeRecord<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        let operation = outcome.operation();
        match outcome {
            Outcome::Authorize { order, decision } => OutcomeRecord {
                operation,
                order,
                succeeded: Some(decision.succeeded),
                status: decision.status.code(),
                amount: "",
            },
            Outcome::Capture { order, decision } => OutcomeRecord {
                operation,
                order,
                succeeded: Some(decision.succeeded),
                status: decision.status.map(|status| status.code()).unwrap_or(""),
                amount: "",
            },
            Outcome::Amount { order, amount } => OutcomeRecord {
                operation,
                order,
                succeeded: None,
                status: "",
                amount,
            },
            Outcome::Reset => OutcomeRecord {
                operation,
                order: "",
                succeeded: None,
                status: "",
                amount: "",
            },
        }
    }
}

/// Writes step outcomes as CSV rows.
///
/// Header: `operation,order,succeeded,status,amount`. An empty `status` on a
/// capture row means the outcome is indeterminate.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(destination),
        }
    }

    pub fn write_outcome(&mut self, outcome: &Outcome) -> Result<()> {
        self.writer.serialize(OutcomeRecord::from(outcome))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{AuthorizeDecision, CaptureDecision};
    use crate::domain::status::{AuthorizeCode, CaptureStatus};

    fn render(outcomes: &[Outcome]) -> String {
        let mut buffer = Vec::new();
        {
            let mut writer = OutcomeWriter::new(&mut buffer);
            for outcome in outcomes {
                writer.write_outcome(outcome).unwrap();
            }
            writer.flush().unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_outcomes() {
        let output = render(&[
            Outcome::Authorize {
                order: "1".to_string(),
                decision: AuthorizeDecision {
                    succeeded: true,
                    status: AuthorizeCode::Capture(CaptureStatus::Captured),
                    captured: true,
                },
            },
            Outcome::Capture {
                order: "2".to_string(),
                decision: CaptureDecision {
                    succeeded: false,
                    status: None,
                },
            },
            Outcome::Amount {
                order: "1".to_string(),
                amount: "10.50".to_string(),
            },
            Outcome::Reset,
        ]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "operation,order,succeeded,status,amount");
        assert_eq!(lines[1], "authorize,1,true,0,");
        assert_eq!(lines[2], "capture,2,false,,");
        assert_eq!(lines[3], "amount,1,,,10.50");
        assert_eq!(lines[4], "reset,,,,");
    }
}
