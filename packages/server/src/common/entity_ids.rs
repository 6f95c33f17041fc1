//! Typed ID definitions for wizard entities.
//!
//! ```rust
//! use portal_core::common::{ApplicationId, ChildId};
//!
//! let application_id = ApplicationId::new();
//! let child_id = ChildId::new();
//! // let wrong: ChildId = application_id; // compile error
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for an application (or renewal) in progress.
pub struct Application;

/// Marker type for a child entry inside an application.
pub struct Child;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for applications; also the suffix of the session key.
pub type ApplicationId = Id<Application>;

/// Typed ID for children, used in child step routes.
pub type ChildId = Id<Child>;
