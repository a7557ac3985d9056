pub mod dice_app;
pub mod handlers;
pub mod state;
pub mod ui;

pub use dice_app::DiceApp;
