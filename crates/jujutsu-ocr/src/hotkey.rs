use std::str::FromStr;

use anyhow::{Context, Result};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use jujutsu_config::hotkey::HotkeyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    Capture,
    Cancel,
    Quit,
}

fn parse(name: &str, binding: &str) -> Result<HotKey> {
    HotKey::from_str(binding).with_context(|| format!("Invalid {name} hotkey '{binding}'"))
}

/// Registered hotkey ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HotkeyIds {
    capture: u32,
    cancel: u32,
    quit: Option<u32>,
}

/// Map a pressed id to its action. Cancel only counts while armed.
fn action_for(ids: HotkeyIds, cancel_armed: bool, id: u32) -> Option<HotkeyAction> {
    if id == ids.capture {
        Some(HotkeyAction::Capture)
    } else if cancel_armed && id == ids.cancel {
        Some(HotkeyAction::Cancel)
    } else if ids.quit == Some(id) {
        Some(HotkeyAction::Quit)
    } else {
        None
    }
}

/// Global capture/cancel/quit hotkeys.
///
/// The cancel key is only grabbed while armed so it does not swallow
/// Escape for other applications outside a capture session.
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    capture: HotKey,
    cancel: HotKey,
    quit: Option<HotKey>,
    cancel_armed: bool,
}

impl HotkeyManager {
    /// Must be created on the thread that runs the UI event loop.
    pub fn from_config(config: &HotkeyConfig) -> Result<Self> {
        let capture = parse("capture", &config.capture)?;
        let cancel = parse("cancel", &config.cancel)?;
        let quit = config
            .quit
            .as_deref()
            .map(|binding| parse("quit", binding))
            .transpose()?;

        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        manager
            .register(capture)
            .with_context(|| format!("Failed to register capture hotkey '{}'", config.capture))?;
        if let Some(quit) = quit {
            manager
                .register(quit)
                .context("Failed to register quit hotkey")?;
        }

        tracing::info!("Capture hotkey registered ({})", config.capture);

        Ok(Self {
            manager,
            capture,
            cancel,
            quit,
            cancel_armed: false,
        })
    }

    /// Grab or release the cancel hotkey.
    pub fn set_cancel_armed(&mut self, armed: bool) -> Result<()> {
        if armed == self.cancel_armed {
            return Ok(());
        }
        if armed {
            self.manager
                .register(self.cancel)
                .context("Failed to register cancel hotkey")?;
        } else {
            self.manager
                .unregister(self.cancel)
                .context("Failed to unregister cancel hotkey")?;
        }
        self.cancel_armed = armed;
        Ok(())
    }

    /// Drain pending hotkey presses (non-blocking).
    pub fn poll(&self) -> Vec<HotkeyAction> {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut actions = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            if event.state != HotKeyState::Pressed {
                continue;
            }
            match action_for(self.ids(), self.cancel_armed, event.id) {
                Some(action) => {
                    tracing::debug!("Hotkey {:?} pressed", action);
                    actions.push(action);
                }
                None => tracing::debug!("Unknown hotkey event id {}", event.id),
            }
        }
        actions
    }

    fn ids(&self) -> HotkeyIds {
        HotkeyIds {
            capture: self.capture.id(),
            cancel: self.cancel.id(),
            quit: self.quit.map(|quit| quit.id()),
        }
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.capture);
        if self.cancel_armed {
            let _ = self.manager.unregister(self.cancel);
        }
        if let Some(quit) = self.quit {
            let _ = self.manager.unregister(quit);
        }
    }
}

#[cfg(test)]
mod tests {
    use global_hotkey::hotkey::{Code, Modifiers};

    use super::*;

    #[test]
    fn default_bindings_parse() {
        let config = HotkeyConfig::default();
        let capture = parse("capture", &config.capture).unwrap();
        assert_eq!(
            capture.id(),
            HotKey::new(Some(Modifiers::CONTROL), Code::Backquote).id()
        );
        let cancel = parse("cancel", &config.cancel).unwrap();
        assert_eq!(cancel.id(), HotKey::new(None, Code::Escape).id());
    }

    fn default_ids() -> HotkeyIds {
        let config = HotkeyConfig::default();
        HotkeyIds {
            capture: parse("capture", &config.capture).unwrap().id(),
            cancel: parse("cancel", &config.cancel).unwrap().id(),
            quit: Some(parse("quit", "ctrl+KeyQ").unwrap().id()),
        }
    }

    #[test]
    fn cancel_is_ignored_until_armed() {
        let ids = default_ids();
        assert_eq!(action_for(ids, false, ids.cancel), None);
        assert_eq!(action_for(ids, true, ids.cancel), Some(HotkeyAction::Cancel));
    }

    #[test]
    fn capture_and_quit_do_not_depend_on_arming() {
        let ids = default_ids();
        for armed in [false, true] {
            assert_eq!(action_for(ids, armed, ids.capture), Some(HotkeyAction::Capture));
            assert_eq!(action_for(ids, armed, ids.quit.unwrap()), Some(HotkeyAction::Quit));
        }
    }

    #[test]
    fn unknown_id_has_no_action() {
        let ids = HotkeyIds {
            capture: 1,
            cancel: 2,
            quit: None,
        };
        assert_eq!(action_for(ids, true, 3), None);
        assert_eq!(action_for(ids, false, 2), None);
    }

    #[test]
    fn bad_binding_names_the_hotkey() {
        let err = parse("quit", "ctrl+NotAKey").unwrap_err();
        assert!(err.to_string().contains("quit"));
    }
}
