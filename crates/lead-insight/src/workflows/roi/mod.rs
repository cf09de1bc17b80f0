//! ROI projection for the pricing calculator.

pub mod domain;
mod multipliers;
mod projector;
pub mod router;
pub mod service;

pub use domain::{RoiError, RoiInputs, RoiResults, SavingsBreakdown};
pub use multipliers::{IndustryMultiplier, IndustryMultiplierTable};
pub use projector::{CostBand, RoiProjector, SavingsAssumptions};
pub use router::roi_router;
pub use service::RoiCalculatorService;
