//! Compiles form filter conditions into the percent-encoded boolean formula
//! accepted by the record-listing API's filter query parameter.
//!
//! ```text
//! Vec<FilterCondition>           (JSON from the form client)
//!   └─ formula_compiler::compile()
//!        ├─ operations::render_fn()   per-condition fragment rendering
//!        └─ AND/OR grouping           AND binds tighter than OR
//!             └─ "OR(AND(a%2Cb)%2Cc)" ready for the query string
//! ```
//!
//! The compiler is a pure function from condition list to string: no I/O, no
//! shared state, safe to call concurrently.

pub mod condition;
pub mod config;
pub mod field;
pub mod formula_compiler;
pub mod operations;
