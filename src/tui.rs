//! TUI (Terminal User Interface) module for the Mastermind game
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `SlotEditor`: Maps key presses to game actions and tracks the cursor
//! - `TuiInterface`: Rendering, terminal lifecycle and the `GameInterface` impl
//!
//! # Input
//! Letters fill the slot under the cursor and advance it. Once a round is won
//! the slots are locked until a new game is started.

use crate::game_state::GameState;
use crate::letter::{LetterState, WORD_LENGTH};
use crate::session::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const LAST_SLOT: usize = WORD_LENGTH - 1;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Background and foreground colors for a slot.
fn state_colors(state: LetterState) -> (Color, Color) {
    match state {
        LetterState::Empty => (Color::DarkGray, Color::White),
        LetterState::Correct => (Color::Green, Color::Black),
        LetterState::WrongPosition => (ORANGE, Color::Black),
        LetterState::Incorrect => (Color::Red, Color::White),
    }
}

fn rejected_message(state: &GameState) -> String {
    if state.is_complete() {
        "Already checked! Change a letter to check again.".to_string()
    } else {
        format!("Fill all {WORD_LENGTH} letters before checking!")
    }
}

/// Cursor and key handling for the four letter slots.
#[derive(Debug, Default)]
struct SlotEditor {
    cursor: usize,
    error_message: String,
}

impl SlotEditor {
    fn reset(&mut self) {
        self.cursor = 0;
        self.error_message.clear();
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_key(&mut self, key: KeyEvent, board: &GameState) -> Option<UserAction> {
        self.error_message.clear();
        debug_log!(
            "handle_key() - Processing key: {:?}, cursor: {}",
            key.code,
            self.cursor
        );

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_key() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Char('n' | 'N') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UserAction::NewGame)
            }
            _ if Self::has_modifier_keys(&key) => {
                debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
                None
            }
            KeyCode::Char('n' | 'N') if board.is_solved() => Some(UserAction::NewGame),
            _ if board.is_solved() => {
                self.error_message = "Round won! Press N for a new game.".to_string();
                None
            }
            KeyCode::Char(c) if c.is_alphabetic() => {
                let position = self.cursor;
                self.cursor = (self.cursor + 1).min(LAST_SLOT);
                Some(UserAction::SetLetter {
                    position,
                    letter: Some(c),
                })
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                debug_log!("handle_key() - Rejecting non-alphabetic character: '{}'", c);
                None
            }
            KeyCode::Backspace => {
                if board.guess()[self.cursor].is_empty() {
                    if self.cursor == 0 {
                        return None;
                    }
                    self.cursor -= 1;
                }
                Some(UserAction::SetLetter {
                    position: self.cursor,
                    letter: None,
                })
            }
            KeyCode::Delete => Some(UserAction::SetLetter {
                position: self.cursor,
                letter: None,
            }),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.cursor = (self.cursor + 1).min(LAST_SLOT);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = LAST_SLOT;
                None
            }
            KeyCode::Enter => Some(UserAction::Evaluate),
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }
}

/// Tracks whether the terminal is still in raw mode on the alternate screen.
#[derive(Debug)]
struct TerminalModes {
    active: bool,
}

impl TerminalModes {
    fn entered() -> Self {
        Self { active: true }
    }

    /// True the first time only; restoring twice would resend the escape sequences.
    fn release(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

fn message_style(won: bool) -> Style {
    if won { SUCCESS_STYLE } else { MESSAGE_STYLE }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    board: Option<&'a GameState>,
    cursor: usize,
    message: &'a str,
    won: bool,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    modes: TerminalModes,
    board: Option<GameState>,
    editor: SlotEditor,
    message: String,
    won: bool,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            modes: TerminalModes::entered(),
            board: None,
            editor: SlotEditor::default(),
            message: String::new(),
            won: false,
            status: "Ready to start".to_string(),
        })
    }

    /// Leave raw mode and the alternate screen. Runs on drop; later calls do nothing.
    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if !self.modes.release() {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: self.board.as_ref(),
            cursor: self.editor.cursor,
            message: &self.message,
            won: self.won,
            error_message: &self.editor.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Letter slots
                Constraint::Min(5),    // Info panel (takes remaining space)
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let solved = ctx.board.is_some_and(GameState::is_solved);
        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx.board, ctx.cursor);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], solved);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MASTERMIND")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, board: Option<&GameState>, cursor: usize) {
        let block = Block::default()
            .title("Guess")
            .borders(Borders::ALL)
            .style(Style::default());
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(board) = board else {
            return;
        };

        let mut slots = vec![Span::raw("  ")];
        let mut marker = vec![Span::raw("  ")];
        for (i, letter) in board.guess().iter().enumerate() {
            let (bg_color, fg_color) = state_colors(letter.state);
            slots.push(Span::styled(
                format!(" {} ", letter.display_char()),
                Style::default().fg(fg_color).bg(bg_color).add_modifier(Modifier::BOLD),
            ));
            slots.push(Span::raw(" "));

            let show_cursor = i == cursor && !board.is_solved();
            marker.push(Span::raw(if show_cursor { " ^  " } else { "    " }));
        }

        let paragraph = Paragraph::new(vec![Line::from(slots), Line::from(marker)]);
        f.render_widget(paragraph, inner);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" G ", Style::default().bg(Color::Green).fg(Color::Black)),
                Span::raw(" right spot   "),
                Span::styled(" O ", Style::default().bg(ORANGE).fg(Color::Black)),
                Span::raw(" wrong spot   "),
                Span::styled(" R ", Style::default().bg(Color::Red).fg(Color::White)),
                Span::raw(" not in word"),
            ]),
            Line::from(""),
        ];

        // Messages
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, message_style(ctx.won))]));
        }

        // Error messages
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, solved: bool) {
        let text = if solved {
            "N: New Game | ESC: Quit"
        } else {
            "Type letters | ←/→: Move | BACKSPACE: Clear | ENTER: Check | CTRL+N: New Game | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout to check if events are available
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let event = event::read()?;
        let Event::Key(key) = event else {
            debug_log!("handle_input() - Ignoring non-key event: {:?}", event);
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Replacement and control characters show up from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code {
            if c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD {
                debug_log!("handle_input() - Ignoring invalid character: {:?}", c);
                return Ok(None);
            }
        }

        let Some(board) = self.board.as_ref() else {
            return Ok(None);
        };
        Ok(self.editor.handle_key(key, board))
    }
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, state: &GameState) {
        self.status = if state.is_solved() {
            "Solved!".to_string()
        } else if state.has_evaluated() {
            "Not quite - change letters and check again".to_string()
        } else if state.can_evaluate() {
            "Ready - press ENTER to check".to_string()
        } else {
            format!("Enter your {WORD_LENGTH}-letter guess")
        };
        self.board = Some(state.clone());
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_check_rejected(&mut self, state: &GameState) {
        self.editor.error_message = rejected_message(state);
        self.draw_or_log();
    }

    fn display_win(&mut self, secret: &str) {
        self.message = format!("Congratulations! You guessed the word: {secret}");
        self.won = true;
        self.status = format!("Game Over - Secret: {secret}");
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self) {
        self.editor.reset();
        self.message = "New game started. Good luck!".to_string();
        self.won = false;
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.won = false;
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
