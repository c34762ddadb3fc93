//! OS-level keyboard injection for the Obsidian trigger path.
//!
//! Unlike every other interaction in the pipeline, the Obsidian path does
//! not go through the browser at all: it fires two key chords at whatever
//! application currently holds OS focus, assuming that is an Obsidian window
//! whose "Image Upload Toolkit: publish page" command exports the current
//! note to the clipboard. No verification of that assumption is possible
//! from here.

use crate::error::PublishError;
use std::sync::Mutex;

/// Modifier keys used in a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Control,
    Shift,
}

/// Fires key chords at the focused application.
pub trait KeyInjector: Send + Sync {
    /// Press `modifiers`, tap `key`, release the modifiers in reverse order.
    fn chord(&self, modifiers: &[Modifier], key: char) -> Result<(), PublishError>;
}

/// The real OS-level injector, via `enigo`.
pub struct SystemKeys {
    inner: Mutex<enigo::Enigo>,
}

impl SystemKeys {
    /// Open a connection to the OS input subsystem.
    pub fn new() -> Result<Self, PublishError> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default()).map_err(|e| {
            PublishError::KeyInjection {
                detail: e.to_string(),
            }
        })?;
        Ok(Self {
            inner: Mutex::new(enigo),
        })
    }
}

impl KeyInjector for SystemKeys {
    fn chord(&self, modifiers: &[Modifier], key: char) -> Result<(), PublishError> {
        use enigo::{Direction, Key, Keyboard};

        let mut enigo = self.inner.lock().map_err(|_| PublishError::KeyInjection {
            detail: "keyboard mutex poisoned".to_string(),
        })?;

        let map_err = |e: enigo::InputError| PublishError::KeyInjection {
            detail: e.to_string(),
        };
        let to_key = |m: &Modifier| match m {
            Modifier::Control => Key::Control,
            Modifier::Shift => Key::Shift,
        };

        for m in modifiers {
            enigo.key(to_key(m), Direction::Press).map_err(map_err)?;
        }
        enigo
            .key(Key::Unicode(key), Direction::Click)
            .map_err(map_err)?;
        for m in modifiers.iter().rev() {
            enigo.key(to_key(m), Direction::Release).map_err(map_err)?;
        }
        Ok(())
    }
}
