//! Global hotkey listener
//!
//! Watches the keyboard system-wide and reports activation chords to the
//! main loop. Ctrl+Shift+Z triggers processing, Ctrl+Shift+X exits.

use rdev::{Event, EventType, Key};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

/// Hotkey chord detected by the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// Ctrl+Shift+Z - process clipboard content
    Activate,
    /// Ctrl+Shift+X - exit the application
    Exit,
}

/// Spawn the blocking listener thread and return the event channel.
///
/// The rdev event loop never returns on success, so it gets a dedicated
/// OS thread rather than a tokio task.
pub fn spawn_listener() -> UnboundedReceiver<HotkeyEvent> {
    let (tx, rx) = unbounded_channel();

    std::thread::spawn(move || {
        let mut tracker = ChordTracker::new(tx);
        if let Err(e) = rdev::listen(move |event| tracker.handle(&event)) {
            error!("Hotkey listener failed: {:?}", e);
            error!("   Check input permissions (X11/uinput access)");
        }
    });

    rx
}

/// Tracks modifier state and emits chord events
struct ChordTracker {
    ctrl: bool,
    shift: bool,
    tx: UnboundedSender<HotkeyEvent>,
}

impl ChordTracker {
    fn new(tx: UnboundedSender<HotkeyEvent>) -> Self {
        Self {
            ctrl: false,
            shift: false,
            tx,
        }
    }

    fn handle(&mut self, event: &Event) {
        match event.event_type {
            EventType::KeyPress(key) => match key {
                Key::ControlLeft | Key::ControlRight => self.ctrl = true,
                Key::ShiftLeft | Key::ShiftRight => self.shift = true,
                Key::KeyZ if self.ctrl && self.shift => {
                    debug!("Activate chord pressed");
                    let _ = self.tx.send(HotkeyEvent::Activate);
                }
                Key::KeyX if self.ctrl && self.shift => {
                    debug!("Exit chord pressed");
                    let _ = self.tx.send(HotkeyEvent::Exit);
                }
                _ => {}
            },
            EventType::KeyRelease(key) => match key {
                Key::ControlLeft | Key::ControlRight => self.ctrl = false,
                Key::ShiftLeft | Key::ShiftRight => self.shift = false,
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(tracker: &mut ChordTracker, key: Key) {
        tracker.handle(&Event {
            time: std::time::SystemTime::now(),
            name: None,
            event_type: EventType::KeyPress(key),
        });
    }

    fn release(tracker: &mut ChordTracker, key: Key) {
        tracker.handle(&Event {
            time: std::time::SystemTime::now(),
            name: None,
            event_type: EventType::KeyRelease(key),
        });
    }

    #[test]
    fn test_activate_chord() {
        let (tx, mut rx) = unbounded_channel();
        let mut tracker = ChordTracker::new(tx);

        press(&mut tracker, Key::ControlLeft);
        press(&mut tracker, Key::ShiftLeft);
        press(&mut tracker, Key::KeyZ);

        assert_eq!(rx.try_recv().ok(), Some(HotkeyEvent::Activate));
    }

    #[test]
    fn test_exit_chord() {
        let (tx, mut rx) = unbounded_channel();
        let mut tracker = ChordTracker::new(tx);

        press(&mut tracker, Key::ControlRight);
        press(&mut tracker, Key::ShiftRight);
        press(&mut tracker, Key::KeyX);

        assert_eq!(rx.try_recv().ok(), Some(HotkeyEvent::Exit));
    }

    #[test]
    fn test_no_event_without_modifiers() {
        let (tx, mut rx) = unbounded_channel();
        let mut tracker = ChordTracker::new(tx);

        press(&mut tracker, Key::KeyZ);
        assert!(rx.try_recv().is_err());

        // Released modifier breaks the chord
        press(&mut tracker, Key::ControlLeft);
        press(&mut tracker, Key::ShiftLeft);
        release(&mut tracker, Key::ShiftLeft);
        press(&mut tracker, Key::KeyZ);
        assert!(rx.try_recv().is_err());
    }
}
