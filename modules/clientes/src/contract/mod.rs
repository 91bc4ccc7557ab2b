pub mod error;
pub mod model;

pub use error::ClientesError;
pub use model::{Cliente, NewCliente};
