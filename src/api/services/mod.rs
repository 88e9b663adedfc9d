//! Services module - contains the business logic behind the route handlers.

pub mod widget_service;

pub use widget_service::{StoreWidgetService, WidgetService};
