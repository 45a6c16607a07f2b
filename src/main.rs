use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, FrameExt, Paragraph};
use ratatui::{DefaultTerminal, Frame};

use numeric_input::{NumericInput, Part, PartLayout, Unit, WidgetConfig, logging};

mod cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = logging::init();
    let args = cli::CliArgs::parse();
    let config = args.apply(WidgetConfig::load_or_default(args.config.as_deref())?)?;
    tracing::info!(?config, "starting");

    ratatui::run(|terminal| -> Result<()> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        let result = App::new(&config).run(terminal);
        execute!(stdout(), DisableBracketedPaste, DisableMouseCapture)?;
        result
    })
}

struct App {
    input: NumericInput,
    input_area: Rect,
}

const INPUT_WIDTH: u16 = 48;
const INPUT_HEIGHT: u16 = 4;

impl App {
    fn new(config: &WidgetConfig) -> Self {
        Self {
            input: NumericInput::from_config(config),
            input_area: Rect::default(),
        }
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();
        loop {
            terminal.draw(|frame| self.render(frame))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if !event::poll(timeout)? {
                self.input.tick();
                last_tick = Instant::now();
                continue;
            }
            // Terminate the program if the user presses 'q' and true is returned
            if self.event_handler()? {
                return Ok(());
            }
        }
    }

    /// Handles user input events.
    ///
    /// @returns Ok(true) if the user wants to quit the program.
    fn event_handler(&mut self) -> Result<bool> {
        let ev = event::read()?;
        if let Some(k) = ev.as_key_press_event() {
            return Ok(self.on_key(k));
        }
        if let Some(m) = ev.as_mouse_event() {
            self.on_mouse(m);
        }
        if let Some(text) = ev.as_paste_event() {
            self.input.paste(text);
        }
        Ok(false)
    }

    fn on_key(&mut self, k: KeyEvent) -> bool {
        if self.input.machine().is_focused() {
            match k.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                    self.input.blur();
                }
                KeyCode::Char(c) => self.input.insert(c),
                KeyCode::Backspace => self.input.backspace(),
                KeyCode::Delete => self.input.delete(),
                KeyCode::Left => self.input.cursor_left(),
                KeyCode::Right => self.input.cursor_right(),
                KeyCode::Home => self.input.cursor_home(),
                KeyCode::End => self.input.cursor_end(),
                KeyCode::Up => self.input.activate(Part::Increment),
                KeyCode::Down => self.input.activate(Part::Decrement),
                _ => {}
            }
            return false;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char('i') => self.input.activate(Part::Field),
            KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => {
                self.input.activate(Part::Increment)
            }
            KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => {
                self.input.activate(Part::Decrement)
            }
            KeyCode::Char('%') => self.input.activate(Part::Unit(Unit::Percent)),
            KeyCode::Char('p') => self.input.activate(Part::Unit(Unit::Pixel)),
            KeyCode::Char('u') => {
                let other = self.input.machine().unit().other();
                self.input.activate(Part::Unit(other));
            }
            _ => (),
        }
        false
    }

    fn on_mouse(&mut self, m: MouseEvent) {
        let layout = PartLayout::new(self.input_area);
        match m.kind {
            MouseEventKind::Moved => {
                self.input
                    .set_hovering(layout.is_over_container(m.column, m.row));
            }
            MouseEventKind::Down(MouseButton::Left) => match layout.hit(m.column, m.row) {
                Some(part) => self.input.activate(part),
                None => {
                    self.input.blur();
                }
            },
            MouseEventKind::ScrollUp if layout.is_over_container(m.column, m.row) => {
                self.input.activate(Part::Increment)
            }
            MouseEventKind::ScrollDown if layout.is_over_container(m.column, m.row) => {
                self.input.activate(Part::Decrement)
            }
            _ => (),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Fill(1), Constraint::Length(9)]);
        let [main, status] = frame.area().layout(&vertical);

        let outer = Block::bordered().title_top(
            Line::from(vec![
                " Edit ".into(),
                "<i> ".blue().bold(),
                " Step ".into(),
                "<+/-> ".blue().bold(),
                " Unit ".into(),
                "<u> ".blue().bold(),
                " Quit ".into(),
                "<q> ".blue().bold(),
            ])
            .centered(),
        );
        let inner = outer.inner(main);
        frame.render_widget(outer, main);

        self.input_area = centered_area(INPUT_WIDTH, INPUT_HEIGHT, inner);
        frame.render_widget_ref(&self.input, self.input_area);
        if let Some(position) = self.input.cursor_position(self.input_area) {
            frame.set_cursor_position(position);
        }

        self.render_status(frame, status);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let machine = self.input.machine();
        let tooltip = self.input.tooltip();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let flag = |on: bool| {
            if on {
                Span::raw("yes").green().add_modifier(Modifier::BOLD)
            } else {
                Span::raw("no").red().add_modifier(Modifier::BOLD)
            }
        };
        let tooltip_line = match tooltip.expires_at() {
            Some(at) => format!(
                "tooltip = {:?} {:?} ({:.1}s left)",
                tooltip.message(),
                tooltip.position(),
                at.saturating_duration_since(Instant::now()).as_secs_f64()
            ),
            None => "tooltip = hidden".to_string(),
        };
        let lines = vec![
            Line::from(Span::styled(format!("value = {}", machine.value()), bold)),
            Line::from(Span::styled(
                format!("text = {:?}", machine.display_text()),
                bold,
            )),
            Line::from(Span::styled(format!("unit = {}", machine.unit()), bold)),
            Line::from(Span::styled(
                format!("previous valid = {}", machine.previous_valid_value()),
                bold,
            )),
            Line::from(vec![
                Span::raw("focused = "),
                flag(machine.is_focused()),
                Span::raw("  decrement disabled = "),
                flag(machine.should_disable_decrement()),
                Span::raw("  increment disabled = "),
                flag(machine.should_disable_increment()),
            ]),
            Line::from(Span::styled(
                tooltip_line,
                Style::default().fg(Color::Yellow),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::bordered().title_top(Line::from(vec![" State ".into()])));
        frame.render_widget(paragraph, area);
    }
}

/// helper function to create a rect of a fixed size centered in `r`
fn centered_area(width: u16, height: u16, r: Rect) -> Rect {
    let [row] = r.layout(&Layout::vertical([Constraint::Length(height)]).flex(Flex::Center));
    let [area] = row.layout(&Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center));
    area
}
