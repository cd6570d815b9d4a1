//! # State Module
//!
//! Interaction state for the two blocking dialogs:
//! - **unlock_state**: biometric/PIN unlock of the privacy ledger
//! - **fx_confirmation**: acknowledgment gate for saves priced at a fallback FX rate
//!
//! Both are plain single-owner state machines. Rendering lives elsewhere.

pub mod fx_confirmation;
pub mod unlock_state;

pub use fx_confirmation::*;
pub use unlock_state::*;
