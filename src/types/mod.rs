pub mod sample;
pub mod trigger;

pub use sample::AccelSample;
pub use trigger::{RollCommand, TriggerSource};
