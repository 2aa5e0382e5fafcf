pub mod air_quality;
pub mod category;
pub mod classification;
pub mod features;
pub mod history;
pub mod recommendation;
pub mod station;

pub use air_quality::*;
pub use category::*;
pub use classification::*;
pub use features::*;
pub use history::PredictionRecord;
pub use recommendation::*;
pub use station::{find_station, Location, Region, Station, WaqiCity};
