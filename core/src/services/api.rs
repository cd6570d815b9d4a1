//! # Data Access Façade
//!
//! One client for every resource the app reads or writes. The configured
//! [`AppMode`] picks the branch for every call:
//!
//! - **mock**: wait the simulated latency, then answer from fixtures. No I/O.
//! - **dev / prod**: JSON request against `api_base_url`.
//!
//! Errors propagate to the caller untouched, except for FX lookups: a failed
//! rate fetch degrades into a fallback table flagged `is_fallback`, which the
//! caller must route through [`crate::state::FxConfirmationGate`].
//!
//! There is no export or share operation for privacy-ledger data.

use chrono::{SecondsFormat, Utc};
use log::{debug, warn};
use shared::{
    BalanceResponse, Budget, EntryType, FamilyMember, FamilyRole, FxRateResponse, FxSource,
    InviteRequest, SaveTransactionPayload, Transaction, TransactionType, VerifyPinRequest,
    VerifyPinResponse,
};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{AppConfig, AppMode};
use crate::error::ApiResult;
use crate::logging::API_LOG_TARGET;
use crate::services::delay::{Delay, TokioDelay};
use crate::services::mock_data::{
    mock_rates_in, parity_rates, MOCK_BALANCE, MOCK_BUDGETS, MOCK_FAMILY_MEMBERS, MOCK_FX_BASE,
    MOCK_FX_RATES, MOCK_TRANSACTIONS,
};
use crate::services::transport::HttpTransport;
use crate::state::unlock_state::PIN_LENGTH;

/// Base currency used when an FX lookup does not name one
pub const DEFAULT_BASE_CURRENCY: &str = "CNY";

/// Display date given to transactions minted by the mock save
pub const MOCK_SAVED_DATE: &str = "Just now";

static LAST_MOCK_ID: AtomicU64 = AtomicU64::new(0);

/// Time-derived id, strictly increasing across the whole process
fn next_mock_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    let mut last = LAST_MOCK_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_MOCK_ID.compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(actual) => last = actual,
        }
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Mode-aware API client
#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    delay: Arc<dyn Delay>,
    transport: HttpTransport,
}

impl ApiClient {
    /// Create a client that waits on the real tokio timer
    pub fn new(config: AppConfig) -> Self {
        Self::with_delay(config, Arc::new(TokioDelay))
    }

    /// Create a client with an injected delay source
    pub fn with_delay(config: AppConfig, delay: Arc<dyn Delay>) -> Self {
        let transport = HttpTransport::new(config.api_base_url.clone(), config.debug);
        Self {
            config,
            delay,
            transport,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn mode(&self) -> AppMode {
        self.config.mode
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi { client: self }
    }

    pub fn balance(&self) -> BalanceApi<'_> {
        BalanceApi { client: self }
    }

    pub fn fx(&self) -> FxApi<'_> {
        FxApi { client: self }
    }

    pub fn family(&self) -> FamilyApi<'_> {
        FamilyApi { client: self }
    }

    pub fn budgets(&self) -> BudgetApi<'_> {
        BudgetApi { client: self }
    }

    pub fn privacy(&self) -> PrivacyApi<'_> {
        PrivacyApi { client: self }
    }

    fn is_mock(&self) -> bool {
        self.config.mode.is_mock()
    }

    /// Simulated network latency for the mock branch
    async fn simulate(&self, operation: &str) {
        self.delay.sleep(self.config.mock_delay).await;
        self.trace(format_args!("mock → {}", operation));
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        if self.config.debug {
            debug!(target: API_LOG_TARGET, "{}", message);
        }
    }
}

pub struct TransactionsApi<'a> {
    client: &'a ApiClient,
}

impl TransactionsApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Transaction>> {
        if self.client.is_mock() {
            self.client.simulate("transactions.list").await;
            return Ok(MOCK_TRANSACTIONS.clone());
        }
        self.client.transport.get("/api/v1/transactions").await
    }

    /// Save a transaction. The mock branch normalizes `transfer` to `expense`;
    /// the network branch sends the payload verbatim.
    pub async fn save(&self, payload: &SaveTransactionPayload) -> ApiResult<Transaction> {
        if self.client.is_mock() {
            self.client.simulate("transactions.save").await;
            self.client.trace(format_args!("payload {:?}", payload));

            let transaction_type = match payload.entry_type {
                EntryType::Income => TransactionType::Income,
                EntryType::Expense | EntryType::Transfer => TransactionType::Expense,
            };

            return Ok(Transaction {
                id: next_mock_id(),
                title: payload.title.clone(),
                amount: payload.amount,
                category: payload.category,
                date: MOCK_SAVED_DATE.to_string(),
                transaction_type,
            });
        }
        self.client.transport.post("/api/v1/transactions", payload).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        if self.client.is_mock() {
            self.client.simulate("transactions.delete").await;
            self.client.trace(format_args!("deleted id {}", id));
            return Ok(());
        }
        self.client
            .transport
            .delete_unit("/api/v1/transactions", id)
            .await
    }
}

pub struct BalanceApi<'a> {
    client: &'a ApiClient,
}

impl BalanceApi<'_> {
    pub async fn get(&self) -> ApiResult<BalanceResponse> {
        if self.client.is_mock() {
            self.client.simulate("balance.get").await;
            return Ok(MOCK_BALANCE.clone());
        }
        self.client.transport.get("/api/v1/balance").await
    }
}

pub struct FxApi<'a> {
    client: &'a ApiClient,
}

impl FxApi<'_> {
    /// Current rates for `base` (default CNY). Never fails: an unavailable
    /// rate service yields a fallback table with `is_fallback = true`.
    pub async fn get_rates(&self, base: Option<&str>) -> FxRateResponse {
        let base = base.unwrap_or(DEFAULT_BASE_CURRENCY);

        if self.client.is_mock() {
            self.client.delay.sleep(self.client.config.mock_delay).await;

            if self.client.config.simulate_fx_failure {
                self.client
                    .trace(format_args!("mock → fx.getRates [fallback, simulated failure]"));
                return FxRateResponse::fallback(base, parity_rates(), now_timestamp());
            }

            // Unknown bases get the fixture table under its own base
            let requested = base.trim().to_ascii_uppercase();
            let (base, rates) = match mock_rates_in(&requested) {
                Some(rates) => (requested, rates),
                None => (MOCK_FX_BASE.to_string(), MOCK_FX_RATES.clone()),
            };
            self.client.trace(format_args!("mock → fx.getRates [{}]", base));
            return FxRateResponse {
                base,
                rates,
                timestamp: now_timestamp(),
                source: FxSource::Api,
                is_fallback: false,
            };
        }

        match self
            .client
            .transport
            .get_with_query::<FxRateResponse>("/api/v1/fx/rates", &[("base", base)])
            .await
        {
            Ok(mut response) => {
                if response.source == FxSource::Fallback {
                    response.is_fallback = true;
                }
                response
            }
            Err(e) => {
                warn!(target: API_LOG_TARGET, "fx.getRates failed, using 1:1 fallback: {}", e);
                FxRateResponse::fallback(base, Default::default(), now_timestamp())
            }
        }
    }
}

pub struct FamilyApi<'a> {
    client: &'a ApiClient,
}

impl FamilyApi<'_> {
    pub async fn members(&self) -> ApiResult<Vec<FamilyMember>> {
        if self.client.is_mock() {
            self.client.simulate("family.getMembers").await;
            return Ok(MOCK_FAMILY_MEMBERS.clone());
        }
        self.client.transport.get("/api/v1/family/members").await
    }

    pub async fn invite(&self, email: &str, role: FamilyRole) -> ApiResult<()> {
        if self.client.is_mock() {
            self.client.simulate("family.invite").await;
            self.client.trace(format_args!("invited {} as {}", email, role));
            return Ok(());
        }
        let request = InviteRequest {
            email: email.to_string(),
            role,
        };
        self.client
            .transport
            .post_unit("/api/v1/family/invite", &request)
            .await
    }
}

pub struct BudgetApi<'a> {
    client: &'a ApiClient,
}

impl BudgetApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Budget>> {
        if self.client.is_mock() {
            self.client.simulate("budget.list").await;
            return Ok(MOCK_BUDGETS.clone());
        }
        self.client.transport.get("/api/v1/budgets").await
    }
}

pub struct PrivacyApi<'a> {
    client: &'a ApiClient,
}

impl PrivacyApi<'_> {
    /// Server-side audit hook only. The real unlock decision is made on the
    /// device and never depends on this call.
    pub async fn verify_pin(&self, pin: &str) -> ApiResult<VerifyPinResponse> {
        if self.client.is_mock() {
            self.client.simulate("privacy.verifyPin").await;
            return Ok(VerifyPinResponse {
                success: pin.chars().count() == PIN_LENGTH,
            });
        }
        let request = VerifyPinRequest {
            pin: pin.to_string(),
        };
        self.client
            .transport
            .post("/api/v1/privacy/verify-pin", &request)
            .await
    }
}
