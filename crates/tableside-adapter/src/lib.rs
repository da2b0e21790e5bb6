/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public order-management API adapter surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod auth;
pub mod http;
pub mod types;

pub use api::{MockOrderApi, OrderApi};

// Re-export commonly used types from auth
pub use auth::TokenStore;

// Re-export commonly used types from http
pub use http::{ClientConfig, Result, TablesideClient, TablesideError};

// Re-export all types
pub use types::*;
