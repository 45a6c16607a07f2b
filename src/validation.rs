//! Blur-time validation as an ordered, first-match-wins table of strategies.

use crate::tooltip::TooltipPosition;
use crate::unit::{PERCENT_MAX, Unit};

pub const NOT_A_NUMBER: &str = "Value must be a floating or natural number";
pub const NEGATIVE: &str = "Value must greater than 0";
pub const PERCENT_OVERFLOW: &str = "Value must smaller than 100";

/// Everything a strategy may look at when the field loses focus.
#[derive(Debug, Clone, Copy)]
pub struct BlurInput<'a> {
    /// Field text as typed (after comma replacement).
    pub display_text: &'a str,
    pub sanitized: &'a str,
    /// `None` when the sanitized text has no finite numeric prefix.
    pub parsed: Option<f64>,
    pub unit: Unit,
}

/// What gets written into the value and display text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Commit {
    /// Value 0, text `"0"`.
    Zero,
    /// Value and text restored from the snapshot taken on focus.
    Revert,
    /// Value as parsed, text as sanitized.
    Accept(f64),
}

/// Advisory message raised alongside a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub message: &'static str,
    pub position: TooltipPosition,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidationStrategy {
    pub name: &'static str,
    pub condition: fn(&BlurInput<'_>) -> bool,
    pub commit: Commit,
    pub feedback: Option<Feedback>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Name of the matching strategy, `"default"` when none matched.
    pub rule: &'static str,
    pub commit: Commit,
    pub feedback: Option<Feedback>,
}

fn is_zero_equivalent(input: &BlurInput<'_>) -> bool {
    let digits = input.sanitized.strip_prefix('-').unwrap_or(input.sanitized);
    input.parsed == Some(0.0) && digits.chars().all(|c| c == '0')
}

fn is_unparseable(input: &BlurInput<'_>) -> bool {
    input.display_text.is_empty() || input.sanitized.is_empty() || input.parsed.is_none()
}

fn is_negative(input: &BlurInput<'_>) -> bool {
    input.parsed.is_some_and(|v| v < 0.0)
}

fn is_percent_overflow(input: &BlurInput<'_>) -> bool {
    input.unit == Unit::Percent && input.parsed.is_some_and(|v| v > PERCENT_MAX)
}

/// The blur rules, in evaluation order.
pub const STRATEGIES: &[ValidationStrategy] = &[
    ValidationStrategy {
        name: "zero",
        condition: is_zero_equivalent,
        commit: Commit::Zero,
        feedback: None,
    },
    ValidationStrategy {
        name: "unparseable",
        condition: is_unparseable,
        commit: Commit::Zero,
        feedback: Some(Feedback {
            message: NOT_A_NUMBER,
            position: TooltipPosition::Center,
        }),
    },
    ValidationStrategy {
        name: "negative",
        condition: is_negative,
        commit: Commit::Zero,
        feedback: Some(Feedback {
            message: NEGATIVE,
            position: TooltipPosition::Left,
        }),
    },
    ValidationStrategy {
        name: "percent-overflow",
        condition: is_percent_overflow,
        commit: Commit::Revert,
        feedback: Some(Feedback {
            message: PERCENT_OVERFLOW,
            position: TooltipPosition::Right,
        }),
    },
];

/// Run `strategies` in order and return the first match, or the accept-as-typed default.
pub fn evaluate(input: &BlurInput<'_>, strategies: &[ValidationStrategy]) -> Outcome {
    strategies
        .iter()
        .find(|strategy| (strategy.condition)(input))
        .map(|strategy| Outcome {
            rule: strategy.name,
            commit: strategy.commit,
            feedback: strategy.feedback,
        })
        .unwrap_or_else(|| Outcome {
            rule: "default",
            // every unparseable input is caught above; Zero keeps the fallback total
            commit: input.parsed.map_or(Commit::Zero, Commit::Accept),
            feedback: None,
        })
}
