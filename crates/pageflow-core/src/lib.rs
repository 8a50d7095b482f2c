pub mod config;
pub mod controller;
pub mod deck;
pub mod document;
pub mod engine;
pub mod error;
pub mod input;
pub mod page;
pub mod style;

pub use config::{Direction, ScrollBehavior, Settings, SettingsPatch};
pub use controller::{PageController, PageEventKind};
pub use deck::Deck;
pub use document::{Document, ElementId};
pub use error::{Error, Result};
pub use input::{Capabilities, HostEvent};
