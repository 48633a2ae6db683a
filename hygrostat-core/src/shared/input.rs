//! Flag-gated input buffer
//!
//! Single producer (keypad dispatch), single consumer (configuration
//! sequencer). The digits and their count live in one `AtomicU64`:
//!
//! ```text
//! bits  0..36   up to 9 digits, 4 bits each, first digit lowest
//! bits 36..40   length (0-9)
//! ```
//!
//! Every producer mutation is one atomic read-modify-write followed by
//! raising `modified`. The consumer lowers `modified` with a swap and
//! only then loads the digits, so a keystroke landing after the load
//! re-raises the flag and is picked up on the next poll.

use portable_atomic::{AtomicBool, AtomicU64, Ordering};

/// Maximum number of digits the buffer holds
pub const MAX_INPUT: usize = 9;

const DIGIT_BITS: u32 = 4;
const LEN_SHIFT: u32 = DIGIT_BITS * MAX_INPUT as u32;
const LEN_MASK: u64 = 0xF << LEN_SHIFT;

/// Bounded digit buffer shared between capture and sequencer
pub struct InputBuffer {
    packed: AtomicU64,
    modified: AtomicBool,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            packed: AtomicU64::new(0),
            modified: AtomicBool::new(false),
        }
    }

    /// Append a digit (producer)
    ///
    /// Returns `false` without touching the buffer when it is full or
    /// `digit` is not 0-9.
    pub fn push(&self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }

        let pushed = self
            .packed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |packed| {
                let len = unpack_len(packed);
                if len >= MAX_INPUT {
                    return None;
                }
                let shift = len as u32 * DIGIT_BITS;
                let digits = (packed & !LEN_MASK) | ((digit as u64) << shift);
                Some(digits | (((len + 1) as u64) << LEN_SHIFT))
            })
            .is_ok();

        if pushed {
            self.modified.store(true, Ordering::Release);
        }
        pushed
    }

    /// Discard all digits (producer, "clear" key)
    pub fn clear(&self) {
        self.packed.store(0, Ordering::Release);
        self.modified.store(true, Ordering::Release);
    }

    /// Empty the buffer and lower the flag (consumer, stage start)
    pub fn reset(&self) {
        self.modified.store(false, Ordering::Release);
        self.packed.store(0, Ordering::Release);
    }

    /// Number of digits held
    pub fn len(&self) -> usize {
        unpack_len(self.packed.load(Ordering::Acquire))
    }

    /// Check if no digits are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the producer changed the buffer since the last take
    pub fn is_modified(&self) -> bool {
        self.modified.load(Ordering::Acquire)
    }

    /// Consume the modified flag (consumer)
    ///
    /// Returns the contents if the flag was raised. The flag is cleared
    /// before the contents are read.
    pub fn take_modified(&self) -> Option<InputSnapshot> {
        if self.modified.swap(false, Ordering::AcqRel) {
            Some(self.snapshot())
        } else {
            None
        }
    }

    /// Copy the current contents without touching the flag
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot::unpack(self.packed.load(Ordering::Acquire))
    }
}

fn unpack_len(packed: u64) -> usize {
    ((packed & LEN_MASK) >> LEN_SHIFT) as usize
}

/// Point-in-time copy of the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    /// ASCII digits
    text: [u8; MAX_INPUT],
    len: u8,
}

impl InputSnapshot {
    fn unpack(packed: u64) -> Self {
        let len = unpack_len(packed).min(MAX_INPUT);
        let mut text = [b'0'; MAX_INPUT];
        for (i, ch) in text.iter_mut().enumerate().take(len) {
            *ch = b'0' + ((packed >> (i as u32 * DIGIT_BITS)) & 0xF) as u8;
        }
        Self {
            text,
            len: len as u8,
        }
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if no digits were entered
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Digits as text, for the display
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text[..self.len()]).unwrap_or("")
    }

    /// Digits as a non-negative integer
    ///
    /// An empty buffer reads as zero. Nine digits always fit in a `u32`.
    pub fn value(&self) -> u32 {
        self.text[..self.len()]
            .iter()
            .fold(0u32, |acc, ch| acc * 10 + (ch - b'0') as u32)
    }
}
