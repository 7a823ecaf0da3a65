use crate::application::scenario::ScenarioStep;
use crate::error::{PagadorError, Result};
use std::io::Read;

/// Reads scenario steps from a CSV source.
///
/// Expects the header `operation, order, card, amount`. Fields are trimmed
/// and trailing empty fields may be omitted. Amounts using `,` as decimal
/// separator must be quoted, with no space before the opening quote.
pub struct ScenarioReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScenarioReader<R> {
    /// Creates a new `ScenarioReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes steps.
    pub fn steps(self) -> impl Iterator<Item = Result<ScenarioStep>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PagadorError::from))
    }
}
