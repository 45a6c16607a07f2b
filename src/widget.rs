//! The composed input: state machine, tooltip, edit buffer and hover, plus its terminal
//! rendering.

use std::time::{Duration, Instant};

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, WidgetRef};

use crate::config::WidgetConfig;
use crate::edit::EditBuffer;
use crate::state::InputStateMachine;
use crate::tooltip::{TooltipController, TooltipPosition};
use crate::unit::Unit;
use crate::validation::Outcome;

const SURFACE: Color = Color::Rgb(0x21, 0x21, 0x21);
const HOVER: Color = Color::Rgb(0x42, 0x42, 0x42);
const ACCENT: Color = Color::Rgb(0x3C, 0x67, 0xFF);
const TEXT: Color = Color::Rgb(0xF9, 0xF9, 0xF9);
const MUTED: Color = Color::Rgb(0xAA, 0xAA, 0xAA);
const DISABLED: Color = Color::Rgb(0x3B, 0x3B, 0x3B);

const CONTAINER_WIDTH: u16 = 26;
const BUTTON_WIDTH: u16 = 3;
const UNIT_WIDTH: u16 = 6;

/// Clickable parts of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Decrement,
    Field,
    Increment,
    Unit(Unit),
}

/// Screen areas of each part for a given render area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartLayout {
    pub tooltip: Rect,
    pub container: Rect,
    pub decrement: Rect,
    pub field: Rect,
    pub increment: Rect,
    pub percent: Rect,
    pub pixel: Rect,
}

impl PartLayout {
    pub fn new(area: Rect) -> Self {
        let vertical =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).flex(Flex::Start);
        let [tooltip, controls] = area.layout(&vertical);
        let horizontal = Layout::horizontal([
            Constraint::Length(CONTAINER_WIDTH),
            Constraint::Length(1),
            Constraint::Length(UNIT_WIDTH),
            Constraint::Length(UNIT_WIDTH),
        ])
        .flex(Flex::Start);
        let [container, _, percent, pixel] = controls.layout(&horizontal);
        let inner = Block::bordered().inner(container);
        let buttons = Layout::horizontal([
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Fill(1),
            Constraint::Length(BUTTON_WIDTH),
        ]);
        let [decrement, field, increment] = inner.layout(&buttons);
        Self {
            tooltip,
            container,
            decrement,
            field,
            increment,
            percent,
            pixel,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<Part> {
        let pos = Position::new(column, row);
        [
            (self.decrement, Part::Decrement),
            (self.field, Part::Field),
            (self.increment, Part::Increment),
            (self.percent, Part::Unit(Unit::Percent)),
            (self.pixel, Part::Unit(Unit::Pixel)),
        ]
        .into_iter()
        .find_map(|(rect, part)| rect.contains(pos).then_some(part))
    }

    pub fn is_over_container(&self, column: u16, row: u16) -> bool {
        self.container.contains(Position::new(column, row))
    }
}

#[derive(Debug)]
pub struct NumericInput {
    machine: InputStateMachine,
    tooltip: TooltipController,
    buffer: EditBuffer,
    is_hovering: bool,
}

impl NumericInput {
    pub fn new(value: f64, unit: Unit, tooltip_duration: Duration) -> Self {
        let machine = InputStateMachine::new(value, unit);
        let buffer = EditBuffer::from(machine.display_text().to_string());
        Self {
            machine,
            tooltip: TooltipController::new(tooltip_duration),
            buffer,
            is_hovering: false,
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.initial_value, config.unit, config.tooltip_duration())
    }

    pub fn machine(&self) -> &InputStateMachine {
        &self.machine
    }

    /// For registering listeners or extra blur strategies.
    pub fn machine_mut(&mut self) -> &mut InputStateMachine {
        &mut self.machine
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.is_hovering = hovering;
    }

    pub fn focus(&mut self) {
        if self.machine.is_focused() {
            return;
        }
        self.machine.on_focus();
        self.buffer.end();
    }

    pub fn blur(&mut self) -> Option<Outcome> {
        if !self.machine.is_focused() {
            return None;
        }
        let outcome = self.machine.on_blur(&mut self.tooltip);
        self.sync_buffer();
        Some(outcome)
    }

    /// Replace the whole field text, as a programmatic edit would.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set(text);
        self.buffer.end();
        self.text_changed();
    }

    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(ch);
        self.text_changed();
    }

    /// Insert `text` at the cursor as one edit.
    pub fn paste(&mut self, text: &str) {
        for ch in text.chars() {
            self.buffer.insert(ch);
        }
        self.text_changed();
    }

    pub fn backspace(&mut self) {
        self.buffer.backspace();
        self.text_changed();
    }

    pub fn delete(&mut self) {
        self.buffer.delete();
        self.text_changed();
    }

    pub fn cursor_left(&mut self) {
        self.buffer.left();
    }

    pub fn cursor_right(&mut self) {
        self.buffer.right();
    }

    pub fn cursor_home(&mut self) {
        self.buffer.home();
    }

    pub fn cursor_end(&mut self) {
        self.buffer.end();
    }

    pub fn increment(&mut self) {
        self.machine.increment();
        self.sync_buffer();
    }

    pub fn decrement(&mut self) {
        self.machine.decrement();
        self.sync_buffer();
    }

    pub fn switch_unit(&mut self, unit: Unit) {
        self.machine.switch_unit(unit);
        self.sync_buffer();
    }

    /// Act on a press of `part`. Pressing anything but the field moves focus away first, so a
    /// pending edit is committed before the button acts on it.
    pub fn activate(&mut self, part: Part) {
        if part == Part::Field {
            self.focus();
            return;
        }
        self.blur();
        match part {
            Part::Decrement => self.decrement(),
            Part::Increment => self.increment(),
            Part::Unit(unit) => self.switch_unit(unit),
            Part::Field => {}
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tooltip.tick()
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.tooltip.tick_at(now)
    }

    /// Terminal cursor position while editing.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.machine.is_focused() {
            return None;
        }
        let field = PartLayout::new(area).field;
        let offset = u16::try_from(self.buffer.cursor).unwrap_or(u16::MAX);
        let max_x = field.right().saturating_sub(1);
        Some(Position::new(
            field.x.saturating_add(offset).min(max_x),
            field.y,
        ))
    }

    fn text_changed(&mut self) {
        // typing implies focus
        self.focus();
        self.machine.on_text_change(&self.buffer.value);
        self.sync_buffer();
    }

    fn sync_buffer(&mut self) {
        if self.buffer.value != self.machine.display_text() {
            self.buffer.set(self.machine.display_text());
        }
        if !self.machine.is_focused() {
            self.buffer.end();
        }
    }

    fn button_style(&self, disabled: bool) -> Style {
        if disabled {
            Style::default().fg(DISABLED)
        } else {
            Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
        }
    }

    fn unit_button(&self, unit: Unit) -> Paragraph<'static> {
        let style = if self.machine.unit() == unit {
            Style::default().bg(HOVER).fg(TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(SURFACE).fg(MUTED)
        };
        Paragraph::new(unit.label())
            .alignment(Alignment::Center)
            .block(Block::bordered())
            .style(style)
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}

impl WidgetRef for &NumericInput {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let layout = PartLayout::new(area);
        let background = if self.is_hovering { HOVER } else { SURFACE };

        if self.tooltip.is_visible() {
            let alignment = match self.tooltip.position() {
                TooltipPosition::Left => Alignment::Left,
                TooltipPosition::Center => Alignment::Center,
                TooltipPosition::Right => Alignment::Right,
            };
            Paragraph::new(Line::from(Span::raw(self.tooltip.message().to_string())))
                .alignment(alignment)
                .style(Style::default().bg(SURFACE).fg(TEXT))
                .render(layout.tooltip, buf);
        }

        let container = if self.machine.is_focused() {
            Block::bordered().border_style(Style::default().fg(ACCENT))
        } else {
            Block::bordered().border_style(Style::default().fg(MUTED))
        };
        container.bg(background).render(layout.container, buf);

        Paragraph::new("−")
            .alignment(Alignment::Center)
            .style(self.button_style(self.machine.should_disable_decrement()))
            .render(layout.decrement, buf);
        Paragraph::new("+")
            .alignment(Alignment::Center)
            .style(self.button_style(self.machine.should_disable_increment()))
            .render(layout.increment, buf);

        let text = if self.machine.is_focused() {
            self.buffer.value.clone()
        } else {
            self.machine.display_text().to_string()
        };
        Paragraph::new(text)
            .style(Style::default().fg(TEXT).bg(background))
            .render(layout.field, buf);

        self.unit_button(Unit::Percent).render(layout.percent, buf);
        self.unit_button(Unit::Pixel).render(layout.pixel, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NEGATIVE, PERCENT_OVERFLOW};

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|cell| cell.symbol().to_string()))
            .collect()
    }

    fn render(input: &NumericInput, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        input.render_ref(area, &mut buf);
        buf
    }

    #[test]
    fn test_typing_focuses_and_tracks_value() {
        let mut input = NumericInput::default();
        input.set_text("");
        for ch in "4,2".chars() {
            input.insert(ch);
        }
        assert!(input.machine().is_focused());
        assert_eq!(input.buffer().value, "4.2");
        assert_eq!(input.machine().value(), 4.2);
    }

    #[test]
    fn test_blur_syncs_buffer_to_committed_text() {
        let mut input = NumericInput::default();
        input.set_text("1a2");
        let outcome = input.blur();
        assert_eq!(outcome.map(|o| o.rule), Some("default"));
        assert_eq!(input.buffer().value, "12");
        assert_eq!(input.buffer().cursor, 2);
    }

    #[test]
    fn test_paste_inserts_at_cursor_as_one_edit() {
        let mut input = NumericInput::new(19.0, Unit::Pixel, Duration::from_secs(5));
        input.activate(Part::Field);
        input.cursor_left();
        input.paste("2,5a");
        assert_eq!(input.buffer().value, "12.5a9");
        assert_eq!(input.machine().value(), 12.59);
        input.blur();
        assert_eq!(input.machine().display_text(), "12.59");
    }

    #[test]
    fn test_blur_when_not_focused_does_nothing() {
        let mut input = NumericInput::default();
        assert_eq!(input.blur(), None);
        assert!(!input.tooltip().is_visible());
    }

    #[test]
    fn test_button_press_commits_pending_edit_first() {
        let mut input = NumericInput::new(50.0, Unit::Percent, Duration::from_secs(5));
        input.activate(Part::Field);
        input.set_text("150");
        input.activate(Part::Increment);
        // 150 reverted to 50 on blur, then incremented
        assert_eq!(input.machine().value(), 51.0);
        assert_eq!(input.buffer().value, "51");
        assert_eq!(input.tooltip().message(), PERCENT_OVERFLOW);
    }

    #[test]
    fn test_unit_press_clamps() {
        let mut input = NumericInput::new(150.0, Unit::Pixel, Duration::from_secs(5));
        input.activate(Part::Unit(Unit::Percent));
        assert_eq!(input.machine().unit(), Unit::Percent);
        assert_eq!(input.buffer().value, "100");
    }

    #[test]
    fn test_tooltip_expires_through_tick() {
        let mut input = NumericInput::new(5.0, Unit::Pixel, Duration::from_secs(2));
        input.set_text("-3");
        input.blur();
        assert!(input.tooltip().is_visible());
        assert!(!input.tick_at(Instant::now()));
        assert!(input.tick_at(Instant::now() + Duration::from_secs(2)));
        assert!(!input.tooltip().is_visible());
    }

    #[test]
    fn test_hit_testing() {
        let layout = PartLayout::new(Rect::new(0, 0, 60, 4));
        assert_eq!(layout.hit(1, 2), Some(Part::Decrement));
        assert_eq!(layout.hit(10, 2), Some(Part::Field));
        assert_eq!(layout.hit(23, 2), Some(Part::Increment));
        assert_eq!(layout.hit(29, 2), Some(Part::Unit(Unit::Percent)));
        assert_eq!(layout.hit(35, 2), Some(Part::Unit(Unit::Pixel)));
        assert_eq!(layout.hit(50, 2), None);
        assert_eq!(layout.hit(10, 0), None);
        assert!(layout.is_over_container(0, 1));
        assert!(!layout.is_over_container(27, 2));
    }

    #[test]
    fn test_cursor_only_while_focused() {
        let area = Rect::new(0, 0, 60, 4);
        let mut input = NumericInput::default();
        assert_eq!(input.cursor_position(area), None);
        input.activate(Part::Field);
        // "1" with the cursor after it, field starts at column 4
        assert_eq!(input.cursor_position(area), Some(Position::new(5, 2)));
    }

    #[test]
    fn test_render_shows_value_and_units() {
        let area = Rect::new(0, 0, 60, 4);
        let input = NumericInput::new(42.0, Unit::Pixel, Duration::from_secs(5));
        let buf = render(&input, area);
        let controls = row(&buf, 2);
        assert!(controls.contains("42"), "{controls:?}");
        assert!(controls.contains('%'));
        assert!(controls.contains("px"));
        assert!(controls.contains('−'));
        assert!(controls.contains('+'));
        assert!(row(&buf, 0).trim().is_empty());
    }

    #[test]
    fn test_render_places_tooltip_by_position() {
        let area = Rect::new(0, 0, 60, 4);
        let mut input = NumericInput::new(5.0, Unit::Pixel, Duration::from_secs(5));
        input.set_text("-1");
        input.blur();
        let top = row(&render(&input, area), 0);
        assert!(top.starts_with(NEGATIVE), "{top:?}");
    }

    #[test]
    fn test_render_shows_buffer_while_editing() {
        let area = Rect::new(0, 0, 60, 4);
        let mut input = NumericInput::default();
        input.set_text("12a");
        assert!(row(&render(&input, area), 2).contains("12a"));
    }
}
