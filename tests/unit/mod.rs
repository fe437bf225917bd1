//! Unit test suite for fieldgraph
//!
//! Behavioural properties of the graph algorithms and the patch model,
//! exercised through the public API.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod graph_properties;
