//! # Domain Module
//!
//! Rules that sit on top of the façade:
//! - **amount_entry**: quick-record amount keypad
//! - **transaction_entry**: FX-aware save orchestration, including the fallback gate detour
//! - **category**: icon and color per category
//! - **budget**: progress and over-limit detection
//! - **family**: role permissions

pub mod amount_entry;
pub mod budget;
pub mod category;
pub mod family;
pub mod transaction_entry;

pub use amount_entry::AmountEntry;
pub use budget::{over_limit, BudgetUsage};
pub use category::{style_for, CategoryStyle};
pub use family::{online_members, RolePermissions};
pub use transaction_entry::{SaveDecision, SubmitOutcome, TransactionDraft, TransactionEntry};
