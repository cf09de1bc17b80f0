pub mod analytics;
pub mod leads;
pub mod roi;
