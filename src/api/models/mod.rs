// Models module - contains the Widget resource

pub mod widget;

pub use widget::{INITIAL_VERSION, Widget};
