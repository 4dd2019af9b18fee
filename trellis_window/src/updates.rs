// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage accumulation and update suspension for one window.

use core::fmt::Debug;

use trellis_geometry::Rect;

/// Where a window's update machinery currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateState {
    /// Updates are enabled and no flush request is outstanding.
    Idle,
    /// Updates are disabled, with this nesting depth.
    Suspended(u32),
    /// A flush has been requested from the event loop and has not run yet.
    Flushing,
}

/// Accumulated damage plus the suspension holder.
#[derive(Clone, Debug)]
pub(crate) struct Updates<T> {
    /// Window area owing a full repaint.
    pub(crate) expose: Rect,
    /// Window area owing only a copy from the backing store.
    pub(crate) update: Rect,
    holder: Option<(T, u32)>,
    pub(crate) flush_pending: bool,
    pub(crate) broke_on_expose: bool,
}

impl<T: Copy + Eq + Debug> Updates<T> {
    pub(crate) fn new() -> Self {
        Self {
            expose: Rect::INVALID,
            update: Rect::INVALID,
            holder: None,
            flush_pending: false,
            broke_on_expose: false,
        }
    }

    pub(crate) fn state(&self) -> UpdateState {
        match self.holder {
            Some((_, depth)) => UpdateState::Suspended(depth),
            None if self.flush_pending => UpdateState::Flushing,
            None => UpdateState::Idle,
        }
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.holder.is_some()
    }

    /// Merge `rect` into the expose or update area.
    pub(crate) fn merge(&mut self, rect: Rect, redraw: bool) {
        if redraw {
            self.expose |= rect;
        } else {
            self.update |= rect;
        }
    }

    /// Whether any damage is waiting.
    pub(crate) fn has_damage(&self) -> bool {
        self.expose.has_area() || self.update.has_area()
    }

    /// Claim the single flush slot. Returns false if a request is already outstanding.
    pub(crate) fn claim_flush(&mut self) -> bool {
        !core::mem::replace(&mut self.flush_pending, true)
    }

    /// Enter (or nest) suspension on `thread`.
    ///
    /// # Panics
    ///
    /// If another thread holds the suspension.
    pub(crate) fn hold(&mut self, thread: T) {
        let Some((owner, depth)) = &mut self.holder else {
            self.holder = Some((thread, 1));
            return;
        };
        if *owner != thread {
            panic!(
                "disable_updates called on thread {thread:?} while updates are held by thread {owner:?}"
            );
        }
        *depth += 1;
    }

    /// Leave one level of suspension. Returns true when the last level was released.
    ///
    /// # Panics
    ///
    /// Without a matching [`Updates::hold`], or when called from a thread that does not hold it.
    pub(crate) fn release(&mut self, thread: T) -> bool {
        let Some((owner, depth)) = &mut self.holder else {
            panic!("enable_updates called on thread {thread:?} without a matching disable_updates");
        };
        if *owner != thread {
            panic!(
                "enable_updates called on thread {thread:?} while updates are held by thread {owner:?}"
            );
        }
        *depth -= 1;
        if *depth > 0 {
            return false;
        }
        self.holder = None;
        true
    }

    /// Take the update area for an immediate copy.
    pub(crate) fn take_update(&mut self) -> Rect {
        core::mem::replace(&mut self.update, Rect::INVALID)
    }

    /// Take everything for the final copy of a completed repaint pass.
    pub(crate) fn take_all(&mut self) -> Rect {
        let expose = core::mem::replace(&mut self.expose, Rect::INVALID);
        expose | self.take_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_splits_expose_and_update() {
        let mut u = Updates::<u8>::new();
        assert!(!u.has_damage());
        u.merge(Rect::new(0.0, 0.0, 10.0, 10.0), true);
        u.merge(Rect::new(20.0, 0.0, 30.0, 10.0), false);
        u.merge(Rect::new(5.0, 5.0, 15.0, 15.0), true);
        assert_eq!(u.expose, Rect::new(0.0, 0.0, 15.0, 15.0));
        assert_eq!(u.update, Rect::new(20.0, 0.0, 30.0, 10.0));
        assert_eq!(u.take_all(), Rect::new(0.0, 0.0, 30.0, 15.0));
        assert!(!u.has_damage());
    }

    #[test]
    fn flush_slot_is_claimed_once() {
        let mut u = Updates::<u8>::new();
        assert_eq!(u.state(), UpdateState::Idle);
        assert!(u.claim_flush());
        assert!(!u.claim_flush());
        assert_eq!(u.state(), UpdateState::Flushing);
        u.flush_pending = false;
        assert!(u.claim_flush());
    }

    #[test]
    fn nesting_on_one_thread() {
        let mut u = Updates::<u8>::new();
        u.hold(1);
        u.hold(1);
        assert_eq!(u.state(), UpdateState::Suspended(2));
        assert!(!u.release(1));
        assert!(u.is_suspended());
        assert!(u.release(1));
        assert_eq!(u.state(), UpdateState::Idle);
    }

    #[test]
    #[should_panic(expected = "held by thread 1")]
    fn hold_from_second_thread_panics() {
        let mut u = Updates::<u8>::new();
        u.hold(1);
        u.hold(2);
    }

    #[test]
    #[should_panic(expected = "without a matching disable_updates")]
    fn unmatched_release_panics() {
        let mut u = Updates::<u8>::new();
        u.release(1);
    }
}
