pub mod aqi;
pub mod assessment;
pub mod classifier;
pub mod rules;

pub use assessment::{Assessment, AssessmentService, CityOverview, ConnectionStatus};
