//! # FX Confirmation Gate
//!
//! Mandatory acknowledgment before saving a transaction priced with a
//! fallback exchange rate. The gate has exactly two exits, `Confirm` and
//! `Later`; backdrop clicks never close it.

use log::info;
use shared::{FxEntrySource, SaveTransactionPayload};

use crate::error::GateError;

pub const GATE_TITLE: &str = "Exchange rate service unavailable";
pub const GATE_MESSAGE: &str =
    "A 1:1 rate was applied. Refresh rates manually once you are back online.";
pub const GATE_DETAIL: &str =
    "This transaction will be recorded at 1:1. Past reports are unaffected and the rate can be corrected later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChoice {
    /// Save with the rate pinned at 1:1
    Confirm,
    /// Defer the save
    Later,
}

/// Pin a payload to parity with a manually-sourced rate
pub fn pin_to_parity(mut payload: SaveTransactionPayload) -> SaveTransactionPayload {
    payload.fx_rate_to_base = 1.0;
    payload.fx_source = FxEntrySource::Manual;
    payload
}

/// Holds at most one save waiting for the user's decision
#[derive(Debug, Default)]
pub struct FxConfirmationGate {
    pending: Option<SaveTransactionPayload>,
}

impl FxConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, payload: SaveTransactionPayload) -> Result<(), GateError> {
        if self.pending.is_some() {
            return Err(GateError::AlreadyOpen);
        }
        info!("⚠️ FX fallback gate opened for '{}'", payload.title);
        self.pending = Some(payload);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&SaveTransactionPayload> {
        self.pending.as_ref()
    }

    /// Close and release the payload, pinned to 1:1, for saving
    pub fn confirm(&mut self) -> Option<SaveTransactionPayload> {
        let payload = self.pending.take()?;
        info!("FX fallback confirmed for '{}'", payload.title);
        Some(pin_to_parity(payload))
    }

    /// Close without saving. The deferred payload is handed back untouched.
    pub fn later(&mut self) -> Option<SaveTransactionPayload> {
        let payload = self.pending.take()?;
        info!("FX fallback save deferred for '{}'", payload.title);
        Some(payload)
    }

    pub fn choose(&mut self, choice: GateChoice) -> Option<SaveTransactionPayload> {
        match choice {
            GateChoice::Confirm => self.confirm(),
            GateChoice::Later => self.later(),
        }
    }

    /// Backdrop click or escape. Never closes the gate.
    pub fn dismiss_backdrop(&self) -> bool {
        false
    }
}
