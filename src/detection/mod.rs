pub mod activity;
pub mod classifier;
pub mod epoch;
pub mod history;
pub mod occupancy;
pub mod rescore;

pub use activity::ActivityWindow;
pub use classifier::classify;
pub use epoch::EpochAggregator;
pub use history::SleepHistory;
pub use occupancy::OccupancyDetector;
pub use rescore::rescore;
