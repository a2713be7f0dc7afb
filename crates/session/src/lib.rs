//! Signing session adapter for the BTC staking flow.
//!
//! A [`StakingSession`] wraps the externally supplied bitcoin and Babylon
//! wallets and announces a [`SigningStep`] event immediately before every
//! delegated signing call, so progress UIs can follow a multi-step flow
//! without the transaction-construction library knowing about them. The
//! session itself never alters the outcome of a delegated call.

pub mod event;
pub mod factory;
pub mod session;

pub use event::{SigningEvents, SigningListener, SigningStep};
pub use factory::{ReadinessReport, SigningSessionFactory};
pub use session::StakingSession;
