//! The console prompts.
//!
//! Prompts and messages are written to `stderr` so they never end up in a report sent to
//! `stdout`.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use rbkfind_lib::{prompt::Prompter, Error, Result};
use std::{
    io::{self, IsTerminal, Write},
    ops::ControlFlow,
};

/// Prompts the user on the terminal.
#[derive(Debug, Default)]
pub struct ConsolePrompter;
impl ConsolePrompter {
    /// Show the prompt without a line ending.
    fn prompt(prompt: &str) -> io::Result<()> {
        let mut stderr = io::stderr();
        write!(stderr, "{prompt}")?;
        stderr.flush()
    }
}
impl Prompter for ConsolePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        Self::prompt(prompt)?;
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Err(Error::from("prompt: end of input")),
            _ => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
    fn read_password(&mut self, prompt: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            // nothing to hide when input is piped in
            return self.read_line(prompt);
        }
        Self::prompt(prompt)?;
        terminal::enable_raw_mode()?;
        let password = read_masked();
        // always give the terminal back, even if reading failed
        terminal::disable_raw_mode()?;
        eprintln!();
        Ok(password?)
    }
    fn show(&mut self, message: &str) -> Result<()> {
        eprintln!("{message}");
        Ok(())
    }
}

/// Read keys until the password is entered.
fn read_masked() -> io::Result<String> {
    let mut password = String::new();
    loop {
        if let Event::Key(key_event) = event::read()? {
            if let ControlFlow::Break(result) = key_pressed(&mut password, key_event) {
                return result.map(|_| password);
            }
        }
    }
}

/// Apply a key to the password being entered.
///
/// [ControlFlow::Break] is returned when the password is complete or entry was cancelled.
///
/// # Arguments
///
/// * `password` is the password entered so far.
/// * `key_event` is the key that was pressed.
fn key_pressed(password: &mut String, key_event: KeyEvent) -> ControlFlow<io::Result<()>> {
    if key_event.kind != KeyEventKind::Press {
        return ControlFlow::Continue(());
    }
    match key_event.code {
        KeyCode::Enter => ControlFlow::Break(Ok(())),
        KeyCode::Esc => ControlFlow::Break(Err(io::Error::new(io::ErrorKind::Interrupted, "password entry cancelled"))),
        KeyCode::Char('c') | KeyCode::Char('d') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            ControlFlow::Break(Err(io::Error::new(io::ErrorKind::Interrupted, "password entry cancelled")))
        }
        KeyCode::Backspace => {
            password.pop();
            ControlFlow::Continue(())
        }
        KeyCode::Char(ch) => {
            password.push(ch);
            ControlFlow::Continue(())
        }
        _ => ControlFlow::Continue(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn password_keys() {
        let mut password = String::new();
        for ch in "secrett".chars() {
            assert!(key_pressed(&mut password, key(KeyCode::Char(ch))).is_continue());
        }
        assert!(key_pressed(&mut password, key(KeyCode::Backspace)).is_continue());
        assert!(key_pressed(&mut password, key(KeyCode::Left)).is_continue());
        let release = KeyEvent { kind: KeyEventKind::Release, state: KeyEventState::NONE, ..key(KeyCode::Char('x')) };
        assert!(key_pressed(&mut password, release).is_continue());
        match key_pressed(&mut password, key(KeyCode::Enter)) {
            ControlFlow::Break(result) => assert!(result.is_ok()),
            ControlFlow::Continue(_) => unreachable!("enter completes the password"),
        }
        assert_eq!(password, "secret");
    }

    #[test]
    fn cancelled() {
        let mut password = String::new();
        for event in [ctrl('c'), ctrl('d'), key(KeyCode::Esc)] {
            match key_pressed(&mut password, event) {
                ControlFlow::Break(result) => assert!(result.is_err()),
                ControlFlow::Continue(_) => unreachable!("entry should be cancelled"),
            }
        }
        assert!(password.is_empty());
    }
}
