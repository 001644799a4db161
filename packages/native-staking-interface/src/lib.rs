pub mod error;
pub mod msg;
pub mod parse;


// Re-export the main types for convenience
pub use error::ShapeError;
pub use msg::{delegations_response_schema, Delegation, DelegationsResponse};
pub use parse::{
    delegations_response_to_binary, parse_delegations_response,
    parse_delegations_response_binary, parse_delegations_response_value,
};
