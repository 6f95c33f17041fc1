// HTTP routes
pub mod error;
pub mod health;
pub mod wizard;

pub use error::*;
pub use health::*;
pub use wizard::*;
