//! # MintLedger Core
//!
//! Headless core of the MintLedger demo app.
//!
//! ## Layout
//!
//! - **config**: run mode (`mock`, `dev`, `prod`), API base URL, debug switch
//! - **logging**: `env_logger` setup keyed off the config
//! - **error**: façade, unlock, gate and entry errors
//! - **services**: the mode-aware [`ApiClient`] façade, HTTP transport, fixtures
//! - **state**: the privacy unlock flow and the FX fallback confirmation gate
//! - **domain**: save orchestration, category styles, budget progress, role permissions
//!
//! Configuration is passed in explicitly; nothing reads a global mode flag.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod services;
pub mod state;

pub use config::{AppConfig, AppMode};
pub use domain::{SaveDecision, SubmitOutcome, TransactionDraft, TransactionEntry};
pub use error::{ApiError, ApiResult, EntryError, GateError, UnlockError};
pub use services::{ApiClient, Delay, RecordingDelay, TokioDelay};
pub use state::{FxConfirmationGate, GateChoice, UnlockFlow, UnlockOutcome, UnlockPhase};
