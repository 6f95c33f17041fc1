pub mod patch;
pub mod state;

pub use patch::*;
pub use state::*;
