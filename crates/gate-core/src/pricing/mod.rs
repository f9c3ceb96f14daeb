//! Pricing: quote calculation, tier selection and discounts.

mod discount;
mod engine;
mod tier;

pub use discount::{apply_discount, Discount};
pub use engine::{compute_total, AreaBasis, QuoteBreakdown, QuoteLine, QuoteTotals, VAT_RATE};
pub use tier::{
    auto_select_main_product, band_marker, select_main_tier, TierSwap, OVER_TOP_BAND_MARKER,
    SLIDING_DOOR_DEFAULT,
};
