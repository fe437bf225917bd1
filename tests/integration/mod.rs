//! Integration test suite for fieldgraph
//!
//! End-to-end tests of the library API through the public crate interface and
//! of the `fieldgraph` binary through `assert_cmd`.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **propagation**: multi-field resolution scenarios through `FieldSet`
//! - **schema**: TOML schemas driving resolution
//! - **check**: `fieldgraph check`
//! - **resolve**: `fieldgraph resolve`
//! - **tree**: `fieldgraph tree` and `fieldgraph order`

#[path = "../common/mod.rs"]
mod common;

mod check;
mod propagation;
mod resolve;
