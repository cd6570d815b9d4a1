//! # Unlock State Module
//!
//! State machine behind the privacy-ledger unlock dialog.
//!
//! ## Flow:
//! ```text
//! Biometric --scan ok--------------------------> Unlocked
//! Biometric --3rd failed scan / manual switch--> Pin
//! Pin       --4 digits, accepted---------------> Unlocked
//! Pin       --4 digits, rejected---------------> Pin (digits cleared, error shown)
//! any open  --cancel---------------------------> Closed
//! ```
//!
//! ## Timers:
//! Steps that take time (scan, failure indicator, PIN check) hand back a
//! [`Pending`] ticket instead of scheduling anything. The caller waits the
//! ticket's delay (see [`wait_for`]) and passes it to [`UnlockFlow::complete`].
//! Every open, close and unlock bumps the controller epoch, so a ticket issued
//! before a reset is ignored when it finally arrives.

use log::{debug, info};
use std::time::Duration;

use crate::error::UnlockError;
use crate::services::delay::Delay;

pub const SCAN_LATENCY: Duration = Duration::from_millis(1200);
pub const SCAN_FAILURE_DISPLAY: Duration = Duration::from_millis(800);
pub const PIN_VERIFY_PAUSE: Duration = Duration::from_millis(300);

/// Failed scans before the controller falls back to PIN entry
pub const MAX_BIOMETRIC_FAILURES: u8 = 3;
pub const PIN_LENGTH: usize = 4;

pub const INCORRECT_PIN_MESSAGE: &str = "Incorrect PIN, please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockPhase {
    Biometric,
    Pin,
    Unlocked,
    Closed,
}

impl UnlockPhase {
    pub fn name(&self) -> &'static str {
        match self {
            UnlockPhase::Biometric => "biometric",
            UnlockPhase::Pin => "pin",
            UnlockPhase::Unlocked => "unlocked",
            UnlockPhase::Closed => "closed",
        }
    }
}

/// Visual state of the fingerprint button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Scanning,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingStep {
    /// Simulated biometric scan; always succeeds
    BiometricScan,
    /// Return the fingerprint button from `Failed` to `Idle`
    ClearScanFailure,
    /// Check a complete 4-digit entry
    VerifyPin(String),
}

/// A timed step waiting to be completed
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending step does nothing until it is completed"]
pub struct Pending {
    epoch: u64,
    step: PendingStep,
    delay: Duration,
}

impl Pending {
    pub fn step(&self) -> &PendingStep {
        &self.step
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Result of completing a [`Pending`] ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    PinRejected,
    ScanIndicatorCleared,
    /// Ticket was stale or no longer applies to the current phase
    Ignored,
}

/// Decides whether a complete PIN entry unlocks the ledger
pub trait PinPolicy {
    fn accepts(&self, pin: &str) -> bool;
}

/// Demo policy: any 4-digit sequence is correct
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFourDigits;

impl PinPolicy for AnyFourDigits {
    fn accepts(&self, pin: &str) -> bool {
        pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
    }
}

/// Sleep for the ticket's delay, then hand it back for completion
pub async fn wait_for(pending: Pending, delay: &dyn Delay) -> Pending {
    delay.sleep(pending.delay).await;
    pending
}

/// Unlock dialog controller. One instance per dialog, never shared.
#[derive(Debug)]
pub struct UnlockFlow<P = AnyFourDigits> {
    phase: UnlockPhase,
    scan_status: ScanStatus,
    digits: String,
    failures: u8,
    error: Option<String>,
    /// A complete entry is being verified; the keypad is locked
    verifying: bool,
    epoch: u64,
    policy: P,
}

impl UnlockFlow<AnyFourDigits> {
    pub fn new() -> Self {
        Self::with_policy(AnyFourDigits)
    }
}

impl Default for UnlockFlow<AnyFourDigits> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinPolicy> UnlockFlow<P> {
    /// Closed controller using a custom PIN policy
    pub fn with_policy(policy: P) -> Self {
        Self {
            phase: UnlockPhase::Closed,
            scan_status: ScanStatus::Idle,
            digits: String::new(),
            failures: 0,
            error: None,
            verifying: false,
            epoch: 0,
            policy,
        }
    }

    /// Show the dialog, always starting from a clean biometric prompt
    pub fn open(&mut self) {
        self.reset_transient();
        self.phase = UnlockPhase::Biometric;
        self.epoch += 1;
        info!("🔒 Unlock flow opened (epoch {})", self.epoch);
    }

    /// Abandon the flow. Outstanding tickets become stale.
    pub fn cancel(&mut self) {
        self.reset_transient();
        self.phase = UnlockPhase::Closed;
        self.epoch += 1;
        info!("Unlock flow cancelled");
    }

    pub fn start_scan(&mut self) -> Result<Pending, UnlockError> {
        self.ensure_phase(UnlockPhase::Biometric)?;
        self.scan_status = ScanStatus::Scanning;
        Ok(self.pending(PendingStep::BiometricScan, SCAN_LATENCY))
    }

    /// Record a failed scan. The third failure moves the flow to PIN entry.
    pub fn report_scan_failure(&mut self) -> Result<Pending, UnlockError> {
        self.ensure_phase(UnlockPhase::Biometric)?;
        self.failures = self.failures.saturating_add(1);
        self.scan_status = ScanStatus::Failed;

        if self.failures >= MAX_BIOMETRIC_FAILURES {
            info!("Biometric failed {} times, falling back to PIN", self.failures);
            self.phase = UnlockPhase::Pin;
        } else {
            debug!("Biometric failure {}/{}", self.failures, MAX_BIOMETRIC_FAILURES);
        }

        Ok(self.pending(PendingStep::ClearScanFailure, SCAN_FAILURE_DISPLAY))
    }

    pub fn can_switch_to_pin(&self) -> bool {
        self.phase == UnlockPhase::Biometric
            && self.failures >= 1
            && self.failures < MAX_BIOMETRIC_FAILURES
    }

    /// User chose PIN entry after at least one failed scan
    pub fn switch_to_pin(&mut self) -> Result<(), UnlockError> {
        self.ensure_phase(UnlockPhase::Biometric)?;
        if !self.can_switch_to_pin() {
            return Err(UnlockError::SwitchUnavailable {
                failures: self.failures,
            });
        }
        self.phase = UnlockPhase::Pin;
        self.scan_status = ScanStatus::Idle;
        Ok(())
    }

    /// Append a keypad digit. Returns the verification ticket when the
    /// fourth digit lands; extra or non-digit input is ignored.
    pub fn press_digit(&mut self, key: char) -> Result<Option<Pending>, UnlockError> {
        self.ensure_phase(UnlockPhase::Pin)?;

        if !key.is_ascii_digit() || self.verifying || self.digits.len() >= PIN_LENGTH {
            return Ok(None);
        }

        self.digits.push(key);
        self.error = None;

        if self.digits.len() == PIN_LENGTH {
            self.verifying = true;
            return Ok(Some(self.pending(
                PendingStep::VerifyPin(self.digits.clone()),
                PIN_VERIFY_PAUSE,
            )));
        }

        Ok(None)
    }

    pub fn delete_digit(&mut self) -> Result<(), UnlockError> {
        self.ensure_phase(UnlockPhase::Pin)?;
        if !self.verifying {
            self.digits.pop();
            self.error = None;
        }
        Ok(())
    }

    /// Apply a timed step whose delay has elapsed
    pub fn complete(&mut self, pending: Pending) -> UnlockOutcome {
        if pending.epoch != self.epoch {
            debug!(
                "Ignoring stale {:?} (ticket epoch {}, current {})",
                pending.step, pending.epoch, self.epoch
            );
            return UnlockOutcome::Ignored;
        }

        match pending.step {
            PendingStep::BiometricScan => {
                if self.phase != UnlockPhase::Biometric {
                    return UnlockOutcome::Ignored;
                }
                self.unlock()
            }
            PendingStep::ClearScanFailure => {
                if self.scan_status == ScanStatus::Failed {
                    self.scan_status = ScanStatus::Idle;
                }
                UnlockOutcome::ScanIndicatorCleared
            }
            PendingStep::VerifyPin(pin) => {
                if self.phase != UnlockPhase::Pin {
                    return UnlockOutcome::Ignored;
                }
                self.verifying = false;

                if self.policy.accepts(&pin) {
                    self.unlock()
                } else {
                    info!("PIN rejected");
                    self.digits.clear();
                    self.error = Some(INCORRECT_PIN_MESSAGE.to_string());
                    UnlockOutcome::PinRejected
                }
            }
        }
    }

    pub fn phase(&self) -> UnlockPhase {
        self.phase
    }

    pub fn scan_status(&self) -> ScanStatus {
        self.scan_status
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    /// Number of digits entered, for the PIN dots
    pub fn entered_len(&self) -> usize {
        self.digits.len()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, UnlockPhase::Biometric | UnlockPhase::Pin)
    }

    pub fn is_unlocked(&self) -> bool {
        self.phase == UnlockPhase::Unlocked
    }

    /// Prompt line shown under the title
    pub fn status_hint(&self) -> String {
        match (self.phase, self.scan_status) {
            (UnlockPhase::Biometric, ScanStatus::Scanning) => "Scanning...".to_string(),
            (UnlockPhase::Biometric, ScanStatus::Failed) => format!(
                "Verification failed ({}/{})",
                self.failures, MAX_BIOMETRIC_FAILURES
            ),
            (UnlockPhase::Biometric, ScanStatus::Idle) => {
                "Tap the fingerprint to verify".to_string()
            }
            (UnlockPhase::Pin, _) => "Enter your PIN".to_string(),
            (UnlockPhase::Unlocked, _) => "Unlocked".to_string(),
            (UnlockPhase::Closed, _) => String::new(),
        }
    }

    fn unlock(&mut self) -> UnlockOutcome {
        info!("✅ Privacy ledger unlocked");
        self.reset_transient();
        self.phase = UnlockPhase::Unlocked;
        self.epoch += 1;
        UnlockOutcome::Unlocked
    }

    fn reset_transient(&mut self) {
        self.scan_status = ScanStatus::Idle;
        self.digits.clear();
        self.failures = 0;
        self.error = None;
        self.verifying = false;
    }

    fn pending(&self, step: PendingStep, delay: Duration) -> Pending {
        Pending {
            epoch: self.epoch,
            step,
            delay,
        }
    }

    fn ensure_phase(&self, expected: UnlockPhase) -> Result<(), UnlockError> {
        if !self.is_open() {
            return Err(UnlockError::NotOpen);
        }
        if self.phase != expected {
            return Err(UnlockError::WrongPhase {
                expected: expected.name(),
                actual: self.phase.name(),
            });
        }
        Ok(())
    }
}
