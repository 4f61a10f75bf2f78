//! Runtime-exec flags: the ISR/foreground boundary.
//!
//! Interrupt context (or, in this host-testable rewrite, any other
//! thread/signal handler) may only *set* bits here and set `abort`.
//! Foreground code reads and clears through [`RtExec::drain`], the
//! non-blocking poll point every busy-wait in this crate calls.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Bits an interrupt handler may set; cleared only by the foreground
    /// drain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RtExecState: u8 {
        /// A reset (abort) has been requested.
        const RESET          = 0x01;
        /// Cycle-start requested (resume from hold, or begin queued work).
        const CYCLE_START    = 0x02;
        /// Feed hold requested.
        const FEED_HOLD      = 0x04;
        /// A status report is pending.
        const STATUS_REPORT  = 0x08;
        /// Safety-door input asserted.
        const SAFETY_DOOR    = 0x10;
    }
}

/// Outcome of draining pending runtime-exec events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrainedEvents {
    pub reset: bool,
    pub cycle_start: bool,
    pub feed_hold: bool,
    pub status_report: bool,
    pub safety_door: bool,
}

/// ISR-settable, foreground-drained flag word plus the sticky abort bit.
///
/// Set/clear are atomic with respect to concurrent setters: any number of
/// threads/signal handlers may call [`RtExec::raise`] and
/// [`RtExec::request_abort`] concurrently with a single foreground drainer.
#[derive(Debug, Default)]
pub struct RtExec {
    flags: AtomicU8,
    abort: AtomicBool,
}

impl RtExec {
    pub const fn new() -> Self {
        Self {
            flags: AtomicU8::new(0),
            abort: AtomicBool::new(false),
        }
    }

    /// Set bits. Safe to call from interrupt/signal context.
    #[inline]
    pub fn raise(&self, bits: RtExecState) {
        self.flags.fetch_or(bits.bits(), Ordering::Release);
    }

    /// Set the sticky abort flag. Safe to call from interrupt/signal
    /// context; idempotent.
    #[inline]
    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::Release);
        self.raise(RtExecState::RESET);
    }

    /// Read the sticky abort flag. Never cleared by `drain` — only a full
    /// re-initialisation clears it.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Reset the abort flag. Only valid as part of a reboot-equivalent
    /// re-initialisation — never call this mid-operation.
    pub fn clear_abort(&self) {
        self.abort.store(false, Ordering::Release);
    }

    /// Drain and clear every pending bit, reporting which were set.
    /// Callers must invoke this inside every busy-wait and re-check
    /// [`RtExec::is_aborted`] afterwards.
    pub fn drain(&self) -> DrainedEvents {
        let bits = self.flags.swap(0, Ordering::AcqRel);
        let set = RtExecState::from_bits_truncate(bits);
        DrainedEvents {
            reset: set.contains(RtExecState::RESET),
            cycle_start: set.contains(RtExecState::CYCLE_START),
            feed_hold: set.contains(RtExecState::FEED_HOLD),
            status_report: set.contains(RtExecState::STATUS_REPORT),
            safety_door: set.contains(RtExecState::SAFETY_DOOR),
        }
    }
}
