//! # fishrack-api - Tank Service Client
//!
//! The REST collaborator used by the application layer.
//!
//! - [`TankService`] - async trait over every remote operation
//! - [`HttpTankService`] - `reqwest` implementation
//! - [`SessionProvider`] - injected bearer-credential source
//! - [`testing::FakeTankService`] - in-memory service (feature `test-helpers`)

pub mod client;
pub mod payload;
pub mod service;
pub mod session;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use client::{HttpTankService, DEFAULT_TIMEOUT};
pub use payload::{MoveRequest, NewTank, RowConfigRequest, SwapRequest, TankFields};
pub use service::{LocalTankService, TankService};
pub use session::{is_well_formed_token, AuthFailureHandler, SessionProvider, StaticSession};
