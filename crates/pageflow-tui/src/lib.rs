pub mod app;
pub mod event;
pub mod render;
pub mod scroll;

pub use app::App;
pub use event::{AppEvent, EventHandler};
