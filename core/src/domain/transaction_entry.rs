//! Recording a transaction: FX lookup, payload assembly, and the fallback
//! confirmation detour.
//!
//! Every payload leaves here with an `fx_rate_to_base`. When the rate service
//! is degraded (or does not know the currency) the rate is pinned to 1 and the
//! save waits in the [`FxConfirmationGate`] until the user decides.

use chrono::{DateTime, Local};
use log::{info, warn};
use shared::{
    Category, EntryType, FxEntrySource, FxRateResponse, SaveTransactionPayload, Transaction,
};

use crate::error::{EntryError, GateError};
use crate::services::api::{ApiClient, DEFAULT_BASE_CURRENCY};
use crate::state::fx_confirmation::{pin_to_parity, FxConfirmationGate, GateChoice};

const MAX_TITLE_LENGTH: usize = 256;

/// What the user typed into the quick-record form
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub entry_type: EntryType,
    pub account_id: String,
    pub currency: String,
    pub note: Option<String>,
    pub occurred_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveDecision {
    /// Priced with a live rate, save right away
    Ready(SaveTransactionPayload),
    /// Priced at 1:1, needs the user's acknowledgment first
    NeedsConfirmation(SaveTransactionPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(Transaction),
    /// The payload is parked in the gate
    AwaitingConfirmation,
    /// The user picked "Later"; nothing was saved
    Deferred,
}

/// Orchestrates saves against one base currency
#[derive(Debug, Clone)]
pub struct TransactionEntry {
    base_currency: String,
}

impl Default for TransactionEntry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_CURRENCY)
    }
}

impl TransactionEntry {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    pub fn validate(draft: &TransactionDraft) -> Result<(), EntryError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(EntryError::InvalidDraft("title is empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(EntryError::InvalidDraft(format!(
                "title longer than {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(EntryError::InvalidDraft(format!(
                "amount must be a positive number, got {}",
                draft.amount
            )));
        }
        if draft.currency.trim().is_empty() {
            return Err(EntryError::InvalidDraft("currency is empty".to_string()));
        }
        Ok(())
    }

    /// Build the payload for `draft` priced with `fx`
    pub fn prepare(&self, draft: &TransactionDraft, fx: &FxRateResponse) -> Result<SaveDecision, EntryError> {
        Self::validate(draft)?;

        let currency = draft.currency.trim().to_ascii_uppercase();
        let payload = SaveTransactionPayload {
            title: draft.title.trim().to_string(),
            amount: draft.amount,
            category: draft.category,
            entry_type: draft.entry_type,
            account_id: draft.account_id.clone(),
            occurred_at: draft.occurred_at.to_rfc3339(),
            occurred_local_date: draft.occurred_at.format("%Y-%m-%d").to_string(),
            currency: currency.clone(),
            fx_rate_to_base: 1.0,
            fx_source: FxEntrySource::Api,
            note: draft.note.clone().filter(|note| !note.trim().is_empty()),
        };

        if fx.is_fallback {
            return Ok(SaveDecision::NeedsConfirmation(pin_to_parity(payload)));
        }

        match fx.rate_for(&currency) {
            Some(rate) if rate.is_finite() && rate > 0.0 => Ok(SaveDecision::Ready(SaveTransactionPayload {
                fx_rate_to_base: 1.0 / rate,
                ..payload
            })),
            _ => {
                warn!(
                    "No usable {} rate in {} table, treating as degraded",
                    currency, fx.base
                );
                Ok(SaveDecision::NeedsConfirmation(pin_to_parity(payload)))
            }
        }
    }

    /// Look up rates, then save or park the payload in `gate`
    pub async fn submit(
        &self,
        api: &ApiClient,
        draft: &TransactionDraft,
        gate: &mut FxConfirmationGate,
    ) -> Result<SubmitOutcome, EntryError> {
        Self::validate(draft)?;
        if gate.is_open() {
            return Err(GateError::AlreadyOpen.into());
        }

        let fx = api.fx().get_rates(Some(&self.base_currency)).await;

        match self.prepare(draft, &fx)? {
            SaveDecision::Ready(payload) => {
                let saved = api.transactions().save(&payload).await?;
                info!("💾 Saved '{}' as {}", saved.title, saved.id);
                Ok(SubmitOutcome::Saved(saved))
            }
            SaveDecision::NeedsConfirmation(payload) => {
                gate.open(payload)?;
                Ok(SubmitOutcome::AwaitingConfirmation)
            }
        }
    }

    /// Apply the user's gate decision
    pub async fn resolve_gate(
        &self,
        api: &ApiClient,
        gate: &mut FxConfirmationGate,
        choice: GateChoice,
    ) -> Result<SubmitOutcome, EntryError> {
        let payload = gate.choose(choice).ok_or(GateError::NotOpen)?;

        match choice {
            GateChoice::Confirm => {
                let saved = api.transactions().save(&payload).await?;
                info!("💾 Saved '{}' at fallback 1:1 rate as {}", saved.title, saved.id);
                Ok(SubmitOutcome::Saved(saved))
            }
            GateChoice::Later => Ok(SubmitOutcome::Deferred),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::amount_entry::AmountEntry;
    use crate::error::ApiError;
    use crate::services::delay::RecordingDelay;
    use chrono::TimeZone;
    use shared::{FxSource, TransactionType};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn draft(currency: &str) -> TransactionDraft {
        TransactionDraft {
            title: "Coffee".to_string(),
            amount: 4.5,
            category: Category::Dining,
            entry_type: EntryType::Expense,
            account_id: "acc-main".to_string(),
            currency: currency.to_string(),
            note: None,
            occurred_at: Local.with_ymd_and_hms(2025, 10, 24, 8, 30, 0).unwrap(),
        }
    }

    fn live_rates(base: &str) -> FxRateResponse {
        let rates: BTreeMap<String, f64> = [("USD", 1.0), ("EUR", 0.92), ("GBP", 0.79)]
            .into_iter()
            .map(|(code, rate)| (code.to_string(), rate))
            .collect();
        FxRateResponse {
            base: base.to_string(),
            rates,
            timestamp: "2025-10-24T00:00:00.000Z".to_string(),
            source: FxSource::Api,
            is_fallback: false,
        }
    }

    fn mock_api(simulate_fx_failure: bool) -> (ApiClient, Arc<RecordingDelay>) {
        let delay = Arc::new(RecordingDelay::new());
        let config = AppConfig::mock().with_simulated_fx_failure(simulate_fx_failure);
        (ApiClient::with_delay(config, delay.clone()), delay)
    }

    #[test]
    fn test_prepare_with_live_rate() {
        let entry = TransactionEntry::new("USD");

        let decision = entry.prepare(&draft("EUR"), &live_rates("USD")).unwrap();

        let SaveDecision::Ready(payload) = decision else {
            panic!("expected a ready payload");
        };
        assert!((payload.fx_rate_to_base - 1.0 / 0.92).abs() < 1e-12);
        assert_eq!(payload.fx_source, FxEntrySource::Api);
        assert_eq!(payload.occurred_local_date, "2025-10-24");
    }

    #[test]
    fn test_prepare_base_currency_is_parity() {
        let entry = TransactionEntry::new("USD");

        let decision = entry.prepare(&draft("usd"), &live_rates("USD")).unwrap();

        assert!(matches!(decision, SaveDecision::Ready(p) if p.fx_rate_to_base == 1.0));
    }

    #[test]
    fn test_prepare_lowercase_currency_is_priced() {
        let entry = TransactionEntry::new("USD");

        let decision = entry.prepare(&draft(" eur"), &live_rates("USD")).unwrap();

        let SaveDecision::Ready(payload) = decision else {
            panic!("expected a ready payload");
        };
        assert_eq!(payload.currency, "EUR");
        assert!((payload.fx_rate_to_base - 1.0 / 0.92).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_mock_rates_price_against_default_base() {
        let (api, _) = mock_api(false);
        let entry = TransactionEntry::default();
        let fx = api.fx().get_rates(None).await;

        let rate_of = |currency: &str| match entry.prepare(&draft(currency), &fx).unwrap() {
            SaveDecision::Ready(payload) => payload.fx_rate_to_base,
            other => panic!("expected a ready payload, got {:?}", other),
        };

        assert!((rate_of("USD") - 7.24).abs() < 1e-9);
        assert!((rate_of("EUR") - 7.24 / 0.92).abs() < 1e-9);
        assert_eq!(rate_of("CNY"), 1.0);
    }

    #[test]
    fn test_keypad_amount_feeds_draft() {
        let mut amount = AmountEntry::new();
        amount.clear();
        for key in "12.5".chars() {
            amount.press(key);
        }
        let mut typed = draft("USD");
        typed.amount = amount.amount();

        let decision = TransactionEntry::new("USD").prepare(&typed, &live_rates("USD")).unwrap();

        assert!(matches!(decision, SaveDecision::Ready(p) if p.amount == 12.5));
    }

    #[test]
    fn test_prepare_fallback_needs_confirmation() {
        let entry = TransactionEntry::default();
        let fx = FxRateResponse::fallback("CNY", BTreeMap::new(), "2025-10-24T00:00:00.000Z");

        let decision = entry.prepare(&draft("EUR"), &fx).unwrap();

        let SaveDecision::NeedsConfirmation(payload) = decision else {
            panic!("expected confirmation");
        };
        assert_eq!(payload.fx_rate_to_base, 1.0);
        assert_eq!(payload.fx_source, FxEntrySource::Manual);
    }

    #[test]
    fn test_prepare_unknown_currency_is_degraded() {
        let entry = TransactionEntry::new("USD");

        let decision = entry.prepare(&draft("JPY"), &live_rates("USD")).unwrap();

        assert!(matches!(decision, SaveDecision::NeedsConfirmation(_)));
    }

    #[test]
    fn test_invalid_drafts_are_rejected() {
        let entry = TransactionEntry::default();
        let fx = live_rates("CNY");

        let mut empty_title = draft("EUR");
        empty_title.title = "   ".to_string();
        assert!(matches!(entry.prepare(&empty_title, &fx), Err(EntryError::InvalidDraft(_))));

        let mut zero = draft("EUR");
        zero.amount = 0.0;
        assert!(matches!(entry.prepare(&zero, &fx), Err(EntryError::InvalidDraft(_))));

        let mut nan = draft("EUR");
        nan.amount = f64::NAN;
        assert!(matches!(entry.prepare(&nan, &fx), Err(EntryError::InvalidDraft(_))));
    }

    #[tokio::test]
    async fn test_submit_saves_directly_with_live_rates() {
        let (api, delay) = mock_api(false);
        let mut gate = FxConfirmationGate::new();

        let outcome = TransactionEntry::default()
            .submit(&api, &draft("EUR"), &mut gate)
            .await
            .unwrap();

        let SubmitOutcome::Saved(saved) = outcome else {
            panic!("expected a saved transaction");
        };
        assert_eq!(saved.date, "Just now");
        assert_eq!(saved.transaction_type, TransactionType::Expense);
        assert!(!gate.is_open());
        assert_eq!(delay.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_with_fx_outage_waits_for_gate() {
        let (api, delay) = mock_api(true);
        let entry = TransactionEntry::default();
        let mut gate = FxConfirmationGate::new();

        let outcome = entry.submit(&api, &draft("EUR"), &mut gate).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::AwaitingConfirmation);
        assert!(gate.is_open());
        assert_eq!(gate.pending().unwrap().fx_rate_to_base, 1.0);
        assert_eq!(gate.pending().unwrap().fx_source, FxEntrySource::Manual);
        // Only the FX lookup ran; the save is blocked
        assert_eq!(delay.calls().len(), 1);

        let outcome = entry.resolve_gate(&api, &mut gate, GateChoice::Confirm).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved(ref t) if t.title == "Coffee"));
        assert!(!gate.is_open());
    }

    #[tokio::test]
    async fn test_later_defers_without_saving() {
        let (api, delay) = mock_api(true);
        let entry = TransactionEntry::default();
        let mut gate = FxConfirmationGate::new();
        entry.submit(&api, &draft("EUR"), &mut gate).await.unwrap();

        let outcome = entry.resolve_gate(&api, &mut gate, GateChoice::Later).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Deferred);
        assert!(!gate.is_open());
        assert_eq!(delay.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_without_pending_save() {
        let (api, _) = mock_api(false);
        let mut gate = FxConfirmationGate::new();

        let err = TransactionEntry::default()
            .resolve_gate(&api, &mut gate, GateChoice::Confirm)
            .await
            .unwrap_err();

        assert_eq!(err, EntryError::Gate(GateError::NotOpen));
    }

    #[tokio::test]
    async fn test_submit_refuses_while_gate_open() {
        let (api, delay) = mock_api(true);
        let entry = TransactionEntry::default();
        let mut gate = FxConfirmationGate::new();
        entry.submit(&api, &draft("EUR"), &mut gate).await.unwrap();

        let err = entry.submit(&api, &draft("GBP"), &mut gate).await.unwrap_err();

        assert_eq!(err, EntryError::Gate(GateError::AlreadyOpen));
        assert_eq!(delay.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_network_outage_routes_through_gate_then_save_fails() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let api = ApiClient::new(AppConfig::from_values(Some("dev"), Some(&base_url)));
        let entry = TransactionEntry::default();
        let mut gate = FxConfirmationGate::new();

        let outcome = entry.submit(&api, &draft("EUR"), &mut gate).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::AwaitingConfirmation);

        let err = entry
            .resolve_gate(&api, &mut gate, GateChoice::Confirm)
            .await
            .unwrap_err();
        assert!(matches!(err, EntryError::Api(ApiError::Network(_))));
    }
}
