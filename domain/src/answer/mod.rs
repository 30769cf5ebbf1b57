//! Answer contracts, schema building, and strict decoding.
//!
//! The request side ([`contract`], [`schema`]) shapes what the model is
//! asked to produce; the response side ([`decoded`]) refuses to trust what
//! actually came back.

pub mod contract;
pub mod decoded;
pub mod schema;

pub use contract::AnswerContract;
pub use decoded::{BooleanAnswer, MultiSelection, PatternAnswer, SingleSelection, decode};
pub use schema::SchemaConstraint;
