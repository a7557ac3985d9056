pub mod feed;

pub use feed::{SensorFeedHandle, is_feed_available, start_sensor_feed};
