pub mod error;
pub mod handlers;

pub use error::*;
pub use handlers::*;
