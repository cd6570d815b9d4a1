//! # Services Module
//!
//! Data access for the app:
//! - **api**: the mode-aware façade (`ApiClient`)
//! - **transport**: JSON-over-HTTP used outside mock mode
//! - **mock_data**: fixtures served in mock mode
//! - **delay**: injectable suspension for simulated latency and dialog timers

pub mod api;
pub mod delay;
pub mod mock_data;
pub mod transport;

pub use api::*;
pub use delay::*;
pub use transport::HttpTransport;
