use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Spending category attached to every transaction and budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Dining,
    Transport,
    Shopping,
    Entertainment,
    Travel,
    Utilities,
    Income,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 9] = [
        Category::Groceries,
        Category::Dining,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Travel,
        Category::Utilities,
        Category::Income,
        Category::Other,
    ];

    /// Categories offered in the quick-record picker
    pub const PICKABLE: [Category; 7] = [
        Category::Groceries,
        Category::Dining,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Travel,
        Category::Utilities,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Dining => "Dining",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Utilities => "Utilities",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a stored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

/// Direction of a transaction being written. `Transfer` only exists on the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Expense,
    Income,
    Transfer,
}

/// A ledger entry as returned by the transactions endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    /// Positive magnitude; `transaction_type` carries the direction
    pub amount: f64,
    pub category: Category,
    /// Display date, e.g. "Today, 5:42 PM" or "Just now"
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// Where the FX rate stored on a transaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FxEntrySource {
    Api,
    Manual,
}

/// Body of `POST /api/v1/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTransactionPayload {
    pub title: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub account_id: String,
    /// RFC 3339 timestamp
    pub occurred_at: String,
    /// Local calendar date, e.g. "2025-10-24"
    pub occurred_local_date: String,
    pub currency: String,
    pub fx_rate_to_base: f64,
    pub fx_source: FxEntrySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub total: f64,
    pub currency: String,
    pub monthly_change: f64,
}

/// Family role. Variants are declared from narrowest to broadest so that
/// the derived ordering gives `Admin > Member > Child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FamilyRole {
    Child,
    Member,
    Admin,
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FamilyRole::Admin => "Admin",
            FamilyRole::Member => "Member",
            FamilyRole::Child => "Child",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub role: FamilyRole,
    pub avatar: String,
    pub status: PresenceStatus,
}

/// Body of `POST /api/v1/family/invite`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
    pub role: FamilyRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub spent: f64,
    pub limit: f64,
}

/// Provenance of an FX rate table. `Cache` is reserved and never produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FxSource {
    Api,
    Cache,
    Fallback,
}

/// FX rate table. Rates are units of the keyed currency per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxRateResponse {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    /// RFC 3339 retrieval time
    pub timestamp: String,
    pub source: FxSource,
    /// When true the caller must get user acknowledgment before saving with these rates
    pub is_fallback: bool,
}

impl FxRateResponse {
    /// Build a fallback table. `is_fallback` is always set.
    pub fn fallback(base: impl Into<String>, rates: BTreeMap<String, f64>, timestamp: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rates,
            timestamp: timestamp.into(),
            source: FxSource::Fallback,
            is_fallback: true,
        }
    }

    /// Rate for `code`. The base currency is always 1.
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        if code.eq_ignore_ascii_case(&self.base) {
            return Some(1.0);
        }
        self.rates.get(code).copied()
    }

    /// Rate for `code`, falling back to parity when the table is degraded
    /// and does not list the currency
    pub fn rate_for_or_parity(&self, code: &str) -> Option<f64> {
        match self.rate_for(code) {
            Some(rate) => Some(rate),
            None if self.is_fallback => Some(1.0),
            None => None,
        }
    }
}

/// Body of `POST /api/v1/privacy/verify-pin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyPinRequest {
    pub pin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyPinResponse {
    pub success: bool,
}
