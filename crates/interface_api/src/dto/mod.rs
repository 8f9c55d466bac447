//! Request/response data transfer objects
//!
//! Requests are accepted as untyped JSON and normalized by the settlement
//! engine, so only responses are modelled here.

pub mod claims;
pub mod settlements;
