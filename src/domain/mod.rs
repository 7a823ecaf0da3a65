//! Processor behavior and the order entity, independent of any transport or store.

pub mod card;
pub mod decision;
pub mod ledger;
pub mod order;
pub mod ports;
pub mod status;
