pub mod generator;
pub mod machine;
pub mod timer;

pub use generator::DiceRoller;
pub use machine::{ResetFacePolicy, RollMachine, RollPhase};
pub use timer::SettleTimer;

/// 骰子面数固定为 6，初始面值为 1
pub const FACE_COUNT: u8 = 6;
pub const INITIAL_FACE: u8 = 1;
