//! Fixed-capacity byte ring shared between an interrupt and the main loop.
//!
//! One context writes (`push`), the other reads (`pop`). `head` is only
//! ever stored by the writer and `tail` only by the reader, so two atomic
//! cursors are enough; no locks or critical sections are needed.
//!
//! One slot is always left empty so that `head == tail` means empty and
//! `head + 1 == tail` means full. Usable capacity is `N - 1`.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Receive ring size used by the firmware UART
pub const RX_BUFFER_SIZE: usize = 128;

/// Transmit ring size used by the firmware UART
pub const TX_BUFFER_SIZE: usize = 32;

/// Single-producer single-consumer byte ring
///
/// All methods take `&self` so a ring can live in a `static` and be used
/// from an interrupt handler. Callers must keep to one producer and one
/// consumer; the type does not enforce it.
pub struct RingBuffer<const N: usize> {
    slots: [AtomicU8; N],
    /// Next slot to write. Stored only by the producer.
    head: AtomicUsize,
    /// Next slot to read. Stored only by the consumer.
    tail: AtomicUsize,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create a new empty ring
    ///
    /// # Panics
    ///
    /// Panics if N is less than 2 (at compile time when used in a `static`).
    pub const fn new() -> Self {
        assert!(N >= 2, "Ring size must leave at least one usable slot");

        Self {
            slots: [const { AtomicU8::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Number of bytes the ring can hold
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Producer: append a byte
    ///
    /// Returns `false` and drops the byte if the ring is full.
    pub fn push(&self, byte: u8) -> bool {
        let head = self.head.load(Ordering::Relaxed);
        let next = (head + 1) % N;

        if next == self.tail.load(Ordering::Acquire) {
            return false;
        }

        self.slots[head].store(byte, Ordering::Relaxed);
        // Publish the slot before moving the cursor past it
        self.head.store(next, Ordering::Release);
        true
    }

    /// Producer: append a byte, spinning until the consumer frees a slot
    pub fn push_blocking(&self, byte: u8) {
        while !self.push(byte) {
            core::hint::spin_loop();
        }
    }

    /// Consumer: take the oldest byte
    pub fn pop(&self) -> Option<u8> {
        let tail = self.tail.load(Ordering::Relaxed);

        if tail == self.head.load(Ordering::Acquire) {
            return None;
        }

        let byte = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store((tail + 1) % N, Ordering::Release);
        Some(byte)
    }

    /// Number of unread bytes
    pub fn available(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        (N + head - tail) % N
    }

    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    pub fn is_full(&self) -> bool {
        self.available() == N - 1
    }

    /// Consumer: discard every unread byte
    ///
    /// Moves `tail` up to `head`. Bytes pushed concurrently with the flush
    /// may survive it.
    pub fn flush(&self) {
        let head = self.head.load(Ordering::Acquire);
        self.tail.store(head, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_ring() {
        let ring = RingBuffer::<8>::new();
        assert_eq!(ring.capacity(), 7);
        assert_eq!(ring.available(), 0);
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_push_pop_in_order() {
        let ring = RingBuffer::<8>::new();
        assert!(ring.push(1));
        assert!(ring.push(2));
        assert!(ring.push(3));
        assert_eq!(ring.available(), 3);

        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_full_ring_drops_new_bytes() {
        let ring = RingBuffer::<4>::new();
        assert!(ring.push(10));
        assert!(ring.push(11));
        assert!(ring.push(12));
        assert!(ring.is_full());

        // Fourth and later pushes are rejected
        assert!(!ring.push(13));
        assert!(!ring.push(14));
        assert_eq!(ring.available(), 3);

        assert_eq!(ring.pop(), Some(10));
        assert_eq!(ring.pop(), Some(11));
        assert_eq!(ring.pop(), Some(12));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_wraparound() {
        let ring = RingBuffer::<4>::new();
        for round in 0..10u8 {
            assert!(ring.push(round));
            assert!(ring.push(round.wrapping_add(100)));
            assert_eq!(ring.available(), 2);
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round.wrapping_add(100)));
        }
    }

    #[test]
    fn test_flush_discards_unread() {
        let ring = RingBuffer::<8>::new();
        ring.push(1);
        ring.push(2);
        ring.flush();

        assert_eq!(ring.available(), 0);
        assert_eq!(ring.pop(), None);

        // Still usable after a flush
        assert!(ring.push(3));
        assert_eq!(ring.pop(), Some(3));
    }

    #[test]
    fn test_blocking_push_waits_for_consumer() {
        let ring = RingBuffer::<4>::new();
        let sent: std::vec::Vec<u8> = (0..=255).collect();

        let received = std::thread::scope(|scope| {
            scope.spawn(|| {
                for &byte in &sent {
                    ring.push_blocking(byte);
                }
            });

            let mut received = std::vec::Vec::new();
            while received.len() < sent.len() {
                match ring.pop() {
                    Some(byte) => received.push(byte),
                    None => std::thread::yield_now(),
                }
            }
            received
        });

        assert_eq!(received, sent);
    }

    #[test]
    fn test_static_ring() {
        static RING: RingBuffer<RX_BUFFER_SIZE> = RingBuffer::new();
        assert_eq!(RING.capacity(), 127);
        assert!(RING.push(0x80));
        assert_eq!(RING.pop(), Some(0x80));
    }

    proptest! {
        #[test]
        fn prop_fifo_keeps_first_n_minus_one(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let ring = RingBuffer::<TX_BUFFER_SIZE>::new();
            let accepted: std::vec::Vec<bool> = bytes.iter().map(|&b| ring.push(b)).collect();

            let kept = bytes.len().min(TX_BUFFER_SIZE - 1);
            prop_assert!(accepted[..kept].iter().all(|&ok| ok));
            prop_assert!(accepted[kept..].iter().all(|&ok| !ok));
            prop_assert_eq!(ring.available(), kept);

            let popped: std::vec::Vec<u8> = core::iter::from_fn(|| ring.pop()).collect();
            prop_assert_eq!(&popped[..], &bytes[..kept]);
        }
    }
}
