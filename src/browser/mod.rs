pub mod handlers;
pub mod render;
pub mod source;
pub mod state;

pub use handlers::*;
pub use source::*;
pub use state::*;
