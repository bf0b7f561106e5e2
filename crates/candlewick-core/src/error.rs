// File: crates/candlewick-core/src/error.rs
// Summary: Domain error type for chart requests.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// Host handed us inputs that violate the request contract
    /// (e.g. flag arrays whose length differs from the bar count).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The 45-degree trend line anchors on the lowest down row;
    /// with no down rows there is nothing to anchor to.
    #[error("no down rows in series; cannot anchor 45-degree trend line")]
    NoDownRows,

    /// Capability referenced by the geometry calculator but not yet built.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
