//! Application layer wiring the processor rules to the order store.
//!
//! `PaymentGateway` is the entry point a transport adapter calls into; it
//! owns the request ledger and an `OrderRepository`. `scenario` replays
//! scripted client sessions against a gateway.

pub mod gateway;
pub mod orders;
pub mod scenario;
