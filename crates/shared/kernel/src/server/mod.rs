//! Server plumbing shared by every slice: application state and system routes.

mod health;
pub mod router;
mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
