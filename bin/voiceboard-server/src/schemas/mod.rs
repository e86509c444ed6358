//! Request / response wire types.
//!
//! Wire field names are camelCase to match the frontend contract; response
//! structs are built from store records via `to_response` so handlers never
//! hand-assemble JSON.

pub mod task;
pub mod voice;
