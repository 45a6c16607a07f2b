//! A numeric input with increment/decrement buttons and a percent/pixel unit toggle.
//!
//! Typing is lenient; leaving the field runs [`validation::STRATEGIES`] and always lands in a
//! valid committed value, optionally raising a [`tooltip`] message.

pub mod config;
pub mod edit;
pub mod logging;
pub mod sanitize;
pub mod state;
pub mod tooltip;
pub mod unit;
pub mod validation;
pub mod widget;

pub use config::WidgetConfig;
pub use state::{InputSnapshot, InputStateMachine};
pub use tooltip::{TooltipController, TooltipPosition, TooltipSink};
pub use unit::Unit;
pub use widget::{NumericInput, Part, PartLayout};
