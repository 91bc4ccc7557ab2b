// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{error, model};

// === INTERNAL MODULES ===
// Exposed for wiring in the server binary and for integration tests.
// Other consumers should stick to `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use api::rest::routes::router;
pub use domain::service::Service;
pub use infra::storage::{ensure_schema, SeaOrmClientesRepository};
