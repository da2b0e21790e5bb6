/*
[INPUT]:  Login responses from the order-management API
[OUTPUT]: Bearer tokens for authenticated requests
[POS]:    Auth layer - session token handling
[UPDATE]: When auth flow or token storage changes
*/

pub mod token;

pub use token::TokenStore;
