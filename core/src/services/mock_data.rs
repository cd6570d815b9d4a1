//! Demo fixtures served in mock mode. Built once per process.

use once_cell::sync::Lazy;
use shared::{
    BalanceResponse, Budget, Category, FamilyMember, FamilyRole, PresenceStatus, Transaction,
    TransactionType,
};
use std::collections::BTreeMap;

pub static MOCK_TRANSACTIONS: Lazy<Vec<Transaction>> = Lazy::new(|| {
    vec![
        transaction("1", "Whole Foods Market", 142.80, Category::Groceries, "Today, 5:42 PM", TransactionType::Expense),
        transaction("2", "Freelance Payment", 2400.00, Category::Income, "Yesterday", TransactionType::Income),
        transaction("3", "Netflix Subscription", 15.99, Category::Entertainment, "Oct 21", TransactionType::Expense),
        transaction("4", "Starbucks", 6.50, Category::Dining, "Oct 20", TransactionType::Expense),
    ]
});

pub static MOCK_FAMILY_MEMBERS: Lazy<Vec<FamilyMember>> = Lazy::new(|| {
    vec![
        member("1", "Jane", FamilyRole::Admin, PresenceStatus::Online),
        member("2", "John", FamilyRole::Admin, PresenceStatus::Online),
        member("3", "Leo", FamilyRole::Child, PresenceStatus::Offline),
    ]
});

pub static MOCK_BUDGETS: Lazy<Vec<Budget>> = Lazy::new(|| {
    vec![
        Budget { category: Category::Shopping, spent: 400.0, limit: 500.0 },
        Budget { category: Category::Dining, spent: 580.0, limit: 600.0 },
        Budget { category: Category::Transport, spent: 150.0, limit: 100.0 },
        Budget { category: Category::Utilities, spent: 200.0, limit: 300.0 },
    ]
});

pub static MOCK_BALANCE: Lazy<BalanceResponse> = Lazy::new(|| BalanceResponse {
    total: 12450.00,
    currency: "USD".to_string(),
    monthly_change: 450.0,
});

/// Currency the fixture FX table is quoted against
pub const MOCK_FX_BASE: &str = "USD";

pub static MOCK_FX_RATES: Lazy<BTreeMap<String, f64>> = Lazy::new(|| {
    [("USD", 1.0), ("CNY", 7.24), ("EUR", 0.92), ("GBP", 0.79)]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect()
});

/// Fixture table re-quoted against `base`. `None` when `base` is not listed.
pub fn mock_rates_in(base: &str) -> Option<BTreeMap<String, f64>> {
    let pivot = MOCK_FX_RATES.get(base).copied()?;
    Some(
        MOCK_FX_RATES
            .iter()
            .map(|(code, rate)| (code.clone(), rate / pivot))
            .collect(),
    )
}

/// Every known currency mapped to parity, used by the simulated FX outage
pub fn parity_rates() -> BTreeMap<String, f64> {
    MOCK_FX_RATES.keys().map(|code| (code.clone(), 1.0)).collect()
}

fn transaction(
    id: &str,
    title: &str,
    amount: f64,
    category: Category,
    date: &str,
    transaction_type: TransactionType,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: title.to_string(),
        amount,
        category,
        date: date.to_string(),
        transaction_type,
    }
}

fn member(id: &str, name: &str, role: FamilyRole, status: PresenceStatus) -> FamilyMember {
    FamilyMember {
        id: id.to_string(),
        name: name.to_string(),
        role,
        avatar: format!("https://picsum.photos/seed/{}/200", name.to_lowercase()),
        status,
    }
}
