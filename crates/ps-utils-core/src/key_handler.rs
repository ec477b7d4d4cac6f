//! Debounced, lockable hotkey detection.
//!
//! [`KeyRepeatHandler`] turns the per-frame "is this key held" state into
//! "this key was just pressed" events. After firing, a key stays silent for
//! `interval` frames, so holding it down auto-repeats at a slow rate instead
//! of triggering every frame.
//!
//! Modal widgets (save popups, text prompts) take a named lock while they are
//! open so that typing into them does not trigger hotkeys.

use std::collections::{BTreeSet, HashSet};

/// Default number of frames a key stays silent after firing.
pub const DEFAULT_KEY_REPEAT_INTERVAL: u32 = 10;

/// Keys that can be queried through a [`KeyRepeatHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Space,
    Num1,
    A,
    B,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    Y,
    Z,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    RightShift,
    RightCtrl,
    PageUp,
    PageDown,
    Enter,
}

impl Key {
    /// Number of supported keys.
    pub const COUNT: usize = 32;

    /// Every supported key, in table order.
    pub const ALL: [Key; Self::COUNT] = [
        Key::Space,
        Key::Num1,
        Key::A,
        Key::B,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::Y,
        Key::Z,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::ArrowDown,
        Key::RightShift,
        Key::RightCtrl,
        Key::PageUp,
        Key::PageDown,
        Key::Enter,
    ];

    /// Looks up a key by its table name (`"a"`, `"space"`, `"left_arrow"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }

    /// Returns the table name of this key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Key::Space => "space",
            Key::Num1 => "1",
            Key::A => "a",
            Key::B => "b",
            Key::D => "d",
            Key::E => "e",
            Key::F => "f",
            Key::G => "g",
            Key::H => "h",
            Key::I => "i",
            Key::J => "j",
            Key::K => "k",
            Key::M => "m",
            Key::N => "n",
            Key::O => "o",
            Key::P => "p",
            Key::Q => "q",
            Key::R => "r",
            Key::S => "s",
            Key::T => "t",
            Key::U => "u",
            Key::Y => "y",
            Key::Z => "z",
            Key::ArrowLeft => "left_arrow",
            Key::ArrowRight => "right_arrow",
            Key::ArrowUp => "up_arrow",
            Key::ArrowDown => "down_arrow",
            Key::RightShift => "rshift",
            Key::RightCtrl => "rctrl",
            Key::PageUp => "page_up",
            Key::PageDown => "page_down",
            Key::Enter => "enter",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Source of physical key state for one frame.
pub trait KeySource {
    /// Returns true if `key` is currently held down.
    fn is_key_down(&self, key: Key) -> bool;
}

impl KeySource for HashSet<Key> {
    fn is_key_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl<F: Fn(Key) -> bool> KeySource for F {
    fn is_key_down(&self, key: Key) -> bool {
        self(key)
    }
}

/// Debounced key-press detector with named locks.
///
/// Call [`step`](Self::step) exactly once per frame before any query. Queries
/// never change state, so asking twice in a frame gives the same answer.
#[derive(Debug, Clone)]
pub struct KeyRepeatHandler {
    counters: [u32; Key::COUNT],
    interval: u32,
    locks: BTreeSet<String>,
}

impl Default for KeyRepeatHandler {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_REPEAT_INTERVAL)
    }
}

impl KeyRepeatHandler {
    /// Creates a handler that silences a key for `interval` frames after it fires.
    ///
    /// An interval of zero would make every held frame indistinguishable from a
    /// fresh press, so it is raised to one.
    #[must_use]
    pub fn new(interval: u32) -> Self {
        Self {
            counters: [0; Key::COUNT],
            interval: interval.max(1),
            locks: BTreeSet::new(),
        }
    }

    /// Returns the repeat interval in frames.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Advances the debounce counters by one frame.
    pub fn step(&mut self, source: &impl KeySource) {
        for key in Key::ALL {
            let counter = &mut self.counters[key.slot()];
            if *counter > 0 {
                *counter -= 1;
            } else if source.is_key_down(key) {
                *counter = self.interval;
            }
        }
    }

    /// Returns true if `key` fired this frame and no lock is held.
    #[must_use]
    pub fn pressed(&self, key: Key) -> bool {
        self.locks.is_empty() && self.counters[key.slot()] == self.interval
    }

    /// Name-based variant of [`pressed`](Self::pressed).
    ///
    /// Names outside the supported key table are a configuration error; they
    /// are logged and answer false.
    #[must_use]
    pub fn query(&self, name: &str) -> bool {
        match Key::from_name(name) {
            Some(key) => self.pressed(key),
            None => {
                log::warn!("KeyRepeatHandler: unsupported key '{name}'");
                false
            }
        }
    }

    /// Suppresses all key events until `owner` unlocks.
    pub fn lock(&mut self, owner: impl Into<String>) {
        let owner = owner.into();
        log::debug!("KeyRepeatHandler: locked by '{owner}'");
        self.locks.insert(owner);
    }

    /// Releases the lock held by `owner`.
    pub fn unlock(&mut self, owner: &str) {
        if !self.locks.remove(owner) {
            log::warn!("KeyRepeatHandler: tried to unlock '{owner}' but it isn't there");
        }
    }

    /// Releases every lock. Use to recover from an inconsistent lock state.
    pub fn unlock_all(&mut self) {
        self.locks.clear();
    }

    /// Returns true if any lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.locks.is_empty()
    }

    /// Returns true if `owner` currently holds a lock.
    #[must_use]
    pub fn is_locked_by(&self, owner: &str) -> bool {
        self.locks.contains(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held(keys: &[Key]) -> HashSet<Key> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_key_table_names_roundtrip() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
        assert_eq!(Key::from_name("left_arrow"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("c"), None);
    }

    #[test]
    fn test_fires_on_down_transition_frame() {
        let mut keys = KeyRepeatHandler::new(3);
        keys.step(&held(&[]));
        assert!(!keys.pressed(Key::A));

        keys.step(&held(&[Key::A]));
        assert!(keys.pressed(Key::A));
        assert!(keys.query("a"));
        // Queries are idempotent within a frame
        assert!(keys.pressed(Key::A));

        keys.step(&held(&[]));
        assert!(!keys.pressed(Key::A));
    }

    #[test]
    fn test_held_key_repeats_after_interval() {
        let mut keys = KeyRepeatHandler::new(2);
        let down = held(&[Key::S]);
        let fired: Vec<bool> = (0..7)
            .map(|_| {
                keys.step(&down);
                keys.pressed(Key::S)
            })
            .collect();
        assert_eq!(fired, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn test_lock_suppresses_and_unlock_restores() {
        let mut keys = KeyRepeatHandler::new(5);
        keys.lock("save_popup");
        keys.lock("save_popup");
        keys.step(&held(&[Key::Enter]));
        assert!(!keys.pressed(Key::Enter));

        keys.unlock("save_popup");
        assert!(!keys.is_locked());
        // Counter was still set while locked
        assert!(keys.pressed(Key::Enter));
    }

    #[test]
    fn test_unlock_absent_owner_is_not_fatal() {
        let mut keys = KeyRepeatHandler::default();
        keys.lock("a");
        keys.unlock("b");
        assert!(keys.is_locked_by("a"));
        keys.unlock_all();
        assert!(!keys.is_locked());
    }

    #[test]
    fn test_unknown_key_name_returns_false() {
        let mut keys = KeyRepeatHandler::default();
        keys.step(&|_: Key| true);
        assert!(keys.query("space"));
        assert!(!keys.query("f13"));
    }

    #[test]
    fn test_zero_interval_is_raised() {
        assert_eq!(KeyRepeatHandler::new(0).interval(), 1);
    }

    proptest! {
        #[test]
        fn prop_locked_handler_never_reports(
            presses in proptest::collection::vec(any::<bool>(), 1..60),
        ) {
            let mut keys = KeyRepeatHandler::new(4);
            keys.lock("modal");
            for down in presses {
                keys.step(&move |key: Key| down && key == Key::Q);
                prop_assert!(!keys.pressed(Key::Q));
            }
        }

        #[test]
        fn prop_short_press_fires_once(
            idle_before in 0usize..10,
            hold in 1usize..=5,
            idle_after in 0usize..10,
        ) {
            let interval = 4;
            let mut keys = KeyRepeatHandler::new(interval);
            let mut frames = vec![false; idle_before];
            frames.extend(std::iter::repeat(true).take(hold));
            frames.extend(std::iter::repeat(false).take(idle_after));

            let mut fired_at = Vec::new();
            for (frame, down) in frames.into_iter().enumerate() {
                keys.step(&move |key: Key| down && key == Key::Space);
                if keys.pressed(Key::Space) {
                    fired_at.push(frame);
                }
            }
            prop_assert_eq!(fired_at, vec![idle_before]);
        }
    }
}
