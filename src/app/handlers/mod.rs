pub mod motion_input;

pub use motion_input::MotionInputHandler;
