//! Operator input.
//!
//! At most one trigger is consumed per loop iteration. The bounded poll
//! timeout doubles as the frame-rate pacer (the loop otherwise runs as fast
//! as frames arrive). Key bindings follow the original console: space to
//! fire, `n` to request a new engagement, Esc or `q` to exit.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;

/// A single operator-initiated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Fire,
    NewOrder,
    Exit,
}

pub trait InputSource {
    /// Poll for at most one trigger, blocking up to `timeout`. Absence of a
    /// key is the common case.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Trigger>>;
}

/// Terminal key input via crossterm. Raw mode is held for the lifetime of
/// the source and restored on drop, on every exit path.
pub struct TerminalInput {
    raw_mode: bool,
}

impl TerminalInput {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("enabling raw terminal mode")?;
        Ok(Self { raw_mode: true })
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Trigger>> {
        if !event::poll(timeout).context("polling terminal input")? {
            return Ok(None);
        }
        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            return Ok(None);
        };
        if kind != KeyEventKind::Press {
            return Ok(None);
        }
        Ok(match code {
            KeyCode::Char(' ') => Some(Trigger::Fire),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Trigger::NewOrder),
            KeyCode::Esc | KeyCode::Char('q') => Some(Trigger::Exit),
            _ => None,
        })
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Scripted input for tests and the demo binary: one entry per iteration,
/// `None` meaning no key that frame. An exhausted script polls as idle.
pub struct ScriptedInput {
    events: VecDeque<Option<Trigger>>,
}

impl ScriptedInput {
    pub fn new(events: Vec<Option<Trigger>>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Fire every `period` iterations, for drive-by demo runs.
    pub fn firing_every(period: usize, total: usize) -> Self {
        let events = (1..=total)
            .map(|i| {
                if period > 0 && i % period == 0 {
                    Some(Trigger::Fire)
                } else {
                    None
                }
            })
            .collect();
        Self::new(events)
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> Result<Option<Trigger>> {
        Ok(self.events.pop_front().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_idles() {
        let mut input = ScriptedInput::new(vec![None, Some(Trigger::Fire), Some(Trigger::Exit)]);
        let t = Duration::from_millis(1);
        assert_eq!(input.poll(t).unwrap(), None);
        assert_eq!(input.poll(t).unwrap(), Some(Trigger::Fire));
        assert_eq!(input.poll(t).unwrap(), Some(Trigger::Exit));
        assert_eq!(input.poll(t).unwrap(), None);
    }

    #[test]
    fn periodic_firing_schedule() {
        let mut input = ScriptedInput::firing_every(3, 6);
        let t = Duration::from_millis(1);
        let mut fires = 0;
        for _ in 0..6 {
            if input.poll(t).unwrap() == Some(Trigger::Fire) {
                fires += 1;
            }
        }
        assert_eq!(fires, 2);
    }
}
