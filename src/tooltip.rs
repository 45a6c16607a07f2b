//! Transient validation feedback with a single replaceable auto-hide deadline.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a tooltip stays up unless replaced.
pub const DEFAULT_TOOLTIP_DURATION: Duration = Duration::from_secs(5);

/// Where the tooltip is anchored relative to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPosition {
    Left,
    #[default]
    Center,
    Right,
}

/// Receiver of validation failures.
pub trait TooltipSink {
    fn show(&mut self, message: &str, position: TooltipPosition);
}

#[derive(Debug, Clone, PartialEq)]
enum TooltipState {
    Hidden,
    Visible { expires_at: Instant },
}

#[derive(Debug, Clone)]
pub struct TooltipController {
    message: String,
    position: TooltipPosition,
    state: TooltipState,
    duration: Duration,
}

impl TooltipController {
    pub fn new(duration: Duration) -> Self {
        Self {
            message: String::new(),
            position: TooltipPosition::default(),
            state: TooltipState::Hidden,
            duration,
        }
    }

    /// Show `message` at `position`, replacing whatever is visible and restarting the countdown
    /// from `now`.
    pub fn show_at(&mut self, message: &str, position: TooltipPosition, now: Instant) {
        if let TooltipState::Visible { .. } = self.state {
            tracing::debug!(previous = %self.message, "replacing visible tooltip");
        }
        self.message = message.to_string();
        self.position = position;
        self.state = TooltipState::Visible {
            expires_at: now + self.duration,
        };
        tracing::debug!(text = message, ?position, "tooltip shown");
    }

    pub fn hide(&mut self) {
        self.state = TooltipState::Hidden;
    }

    /// Advance the clock. Returns true if the tooltip expired on this tick.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.state {
            TooltipState::Visible { expires_at } if now >= expires_at => {
                tracing::trace!(text = %self.message, "tooltip expired");
                self.state = TooltipState::Hidden;
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TooltipState::Visible { .. })
    }

    /// Last message shown. Kept after hiding so a fading render can still draw it.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> TooltipPosition {
        self.position
    }

    pub fn expires_at(&self) -> Option<Instant> {
        match self.state {
            TooltipState::Visible { expires_at } => Some(expires_at),
            TooltipState::Hidden => None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLTIP_DURATION)
    }
}

impl TooltipSink for TooltipController {
    fn show(&mut self, message: &str, position: TooltipPosition) {
        self.show_at(message, position, Instant::now());
    }
}
