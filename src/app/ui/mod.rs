pub mod dice_panel;
pub mod status_bar;

pub use dice_panel::render_dice_panel;
pub use status_bar::render_status_bar;
