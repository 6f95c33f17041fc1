//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod session;
pub mod submission_client;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use session::{session_layer, SESSION_COOKIE};
pub use submission_client::{HttpBenefitSubmitter, UnconfiguredSubmitter};
pub use test_dependencies::TestDependencies;
pub use traits::*;
