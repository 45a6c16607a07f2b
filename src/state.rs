//! The input's value/text reconciliation: lenient while typing, strict on blur.

use std::fmt;

use crate::sanitize::{normalize_separator, parse_leading, parse_sanitized, sanitize, stringify};
use crate::tooltip::TooltipSink;
use crate::unit::{PERCENT_MAX, Unit};
use crate::validation::{self, BlurInput, Commit, Outcome, ValidationStrategy};

pub const DEFAULT_VALUE: f64 = 1.0;
const STEP: f64 = 1.0;

/// Read model handed to the renderer and to change listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSnapshot {
    pub value: f64,
    pub display_text: String,
    pub unit: Unit,
    pub is_focused: bool,
    pub decrement_disabled: bool,
    pub increment_disabled: bool,
}

pub type ChangeListener = Box<dyn FnMut(&InputSnapshot)>;

pub struct InputStateMachine {
    value: f64,
    display_text: String,
    unit: Unit,
    is_focused: bool,
    previous_valid_value: f64,
    strategies: Vec<ValidationStrategy>,
    listeners: Vec<ChangeListener>,
}

impl InputStateMachine {
    /// `value` is clamped into `unit`'s range; non-finite values fall back to 0.
    pub fn new(value: f64, unit: Unit) -> Self {
        let value = if value.is_finite() { unit.clamp(value) } else { 0.0 };
        Self {
            value,
            display_text: stringify(value),
            unit,
            is_focused: false,
            previous_valid_value: value,
            strategies: validation::STRATEGIES.to_vec(),
            listeners: Vec::new(),
        }
    }

    /// Append a blur rule, evaluated after the built-in ones.
    pub fn push_strategy(&mut self, strategy: ValidationStrategy) {
        self.strategies.push(strategy);
    }

    /// Register a callback fired after every operation that changed observable state.
    pub fn on_change(&mut self, listener: impl FnMut(&InputSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn previous_valid_value(&self) -> f64 {
        self.previous_valid_value
    }

    pub fn should_disable_decrement(&self) -> bool {
        self.value <= 0.0
    }

    pub fn should_disable_increment(&self) -> bool {
        self.unit == Unit::Percent && self.value >= PERCENT_MAX
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            value: self.value,
            display_text: self.display_text.clone(),
            unit: self.unit,
            is_focused: self.is_focused,
            decrement_disabled: self.should_disable_decrement(),
            increment_disabled: self.should_disable_increment(),
        }
    }

    pub fn on_focus(&mut self) {
        let before = self.snapshot();
        self.is_focused = true;
        self.previous_valid_value = self.value;
        tracing::debug!(snapshot = self.value, "focus");
        self.notify(before);
    }

    /// Live typing: only the comma is rewritten in the text; the value follows whenever the
    /// fully sanitized text parses.
    pub fn on_text_change(&mut self, text: &str) {
        let before = self.snapshot();
        self.display_text = normalize_separator(text);
        if let Some(parsed) = parse_sanitized(text) {
            self.value = parsed;
        }
        tracing::debug!(text = %self.display_text, value = self.value, "text change");
        self.notify(before);
    }

    /// Leave the field and commit through the blur strategies. Failures are reported to
    /// `tooltip`.
    pub fn on_blur(&mut self, tooltip: &mut dyn TooltipSink) -> Outcome {
        let before = self.snapshot();
        self.is_focused = false;

        let sanitized = sanitize(&self.display_text);
        let input = BlurInput {
            display_text: &self.display_text,
            sanitized: &sanitized,
            parsed: parse_leading(&sanitized).filter(|v| v.is_finite()),
            unit: self.unit,
        };
        let outcome = validation::evaluate(&input, &self.strategies);
        tracing::debug!(%sanitized, rule = outcome.rule, "blur");

        match outcome.commit {
            Commit::Zero => self.set_committed(0.0),
            // the snapshot may predate a unit switch or an unfocused edit
            Commit::Revert => self.set_committed(self.unit.clamp(self.previous_valid_value)),
            Commit::Accept(value) => {
                self.value = value;
                self.display_text = sanitized;
            }
        }
        if let Some(feedback) = outcome.feedback {
            tooltip.show(feedback.message, feedback.position);
        }
        self.notify(before);
        outcome
    }

    pub fn increment(&mut self) {
        if self.should_disable_increment() {
            return;
        }
        self.step(STEP);
    }

    pub fn decrement(&mut self) {
        if self.should_disable_decrement() {
            return;
        }
        self.step(-STEP);
    }

    fn step(&mut self, delta: f64) {
        let before = self.snapshot();
        self.set_committed(self.unit.clamp(self.value + delta));
        tracing::debug!(value = self.value, "step");
        self.notify(before);
    }

    /// Change unit, clamping the value into the new unit's range in the same operation.
    pub fn switch_unit(&mut self, unit: Unit) {
        if unit == self.unit {
            return;
        }
        let before = self.snapshot();
        let clamped = unit.clamp(self.value);
        if clamped != self.value {
            self.set_committed(clamped);
        }
        self.unit = unit;
        tracing::debug!(%unit, value = self.value, "unit switched");
        self.notify(before);
    }

    fn set_committed(&mut self, value: f64) {
        self.value = value;
        self.display_text = stringify(value);
    }

    fn notify(&mut self, before: InputSnapshot) {
        if self.listeners.is_empty() {
            return;
        }
        let after = self.snapshot();
        if after == before {
            return;
        }
        for listener in &mut self.listeners {
            listener(&after);
        }
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_VALUE, Unit::default())
    }
}

impl fmt::Debug for InputStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStateMachine")
            .field("value", &self.value)
            .field("display_text", &self.display_text)
            .field("unit", &self.unit)
            .field("is_focused", &self.is_focused)
            .field("previous_valid_value", &self.previous_valid_value)
            .field("strategies", &self.strategies.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
