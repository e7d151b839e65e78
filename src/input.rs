use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::components::Dir;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::game::{Command, CommandSource};

/// Maps one key press to a command. Releases, repeats and unbound keys
/// yield `None`.
pub fn command_for(keys: &KeyBindings, key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Up => Some(Command::Move(Dir::Up)),
        KeyCode::Left => Some(Command::Move(Dir::Left)),
        KeyCode::Down => Some(Command::Move(Dir::Down)),
        KeyCode::Right => Some(Command::Move(Dir::Right)),
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            if c == keys.quit {
                Some(Command::Quit)
            } else if c == keys.up {
                Some(Command::Move(Dir::Up))
            } else if c == keys.left {
                Some(Command::Move(Dir::Left))
            } else if c == keys.down {
                Some(Command::Move(Dir::Down))
            } else if c == keys.right {
                Some(Command::Move(Dir::Right))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Blocking keyboard reader. Invalid keys are dropped and the next one is
/// read, so only valid commands ever reach the game.
pub struct Keyboard {
    keys: KeyBindings,
}

impl Keyboard {
    pub fn new(keys: KeyBindings) -> Self {
        Keyboard { keys }
    }

    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }

    /// Start gate: Enter starts, the quit key (or Ctrl-C) declines.
    pub fn confirm_start(&mut self) -> Result<bool> {
        loop {
            let key = self.next_key()?;
            if key.code == KeyCode::Enter {
                return Ok(true);
            }
            if command_for(&self.keys, &key) == Some(Command::Quit) {
                return Ok(false);
            }
        }
    }

    pub fn wait_for_any_key(&mut self) -> Result<()> {
        self.next_key().map(|_| ())
    }
}

impl CommandSource for Keyboard {
    fn next_command(&mut self) -> Result<Command> {
        loop {
            let key = self.next_key()?;
            match command_for(&self.keys, &key) {
                Some(command) => return Ok(command),
                None => trace!(code = ?key.code, "ignored key"),
            }
        }
    }
}
