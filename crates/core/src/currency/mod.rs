//! Multi-currency handling and exchange rates.

pub mod conversion;
pub mod exchange;
pub mod normalizer;

pub use conversion::convert_amount;
pub use exchange::{ExchangeRate, RateSource, RateTable};
pub use normalizer::{CurrencyError, CurrencyNormalizer, is_zero};
