//! Shared client core for the Driftpay front-end: wallet session
//! normalization and storage/transport seams, plus send-form input
//! handling. Everything here is platform-neutral; the web shell supplies
//! the browser-backed implementations.

pub mod send;
pub mod wallet;
