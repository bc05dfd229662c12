//! Producer/consumer ring buffer for live sample sources.
//!
//! Mirrors the original design: a fixed ring of preallocated buffers where
//! producer and consumer each hold the mutex for the slot they are
//! currently filling/draining, advancing by acquiring the next slot's mutex
//! before releasing the current one. There is no unbounded queue; if the
//! producer cannot acquire the next slot, the just-filled buffer is dropped
//! and reported as an overflow, not treated as fatal.

use std::sync::{Arc, Mutex, MutexGuard};

/// One ring slot: a fixed-size sample buffer plus how many samples it holds.
#[derive(Debug, Default)]
struct Slot {
    buffer: Vec<f64>,
    len: usize,
}

/// A bounded ring of IQ sample buffers shared between a producer (sample
/// source) thread and the consumer (decoder) thread.
pub struct SampleRing {
    slots: Vec<Arc<Mutex<Slot>>>,
}

impl SampleRing {
    /// Builds a ring of `slot_count` buffers, each able to hold
    /// `samples_per_slot` interleaved IQ values (`2 * n_samples` f64s).
    pub fn new(slot_count: usize, samples_per_slot: usize) -> Self {
        assert!(slot_count >= 2, "ring needs at least a producer and a consumer slot");
        let slots = (0..slot_count)
            .map(|_| {
                Arc::new(Mutex::new(Slot {
                    buffer: vec![0.0; samples_per_slot * 2],
                    len: 0,
                }))
            })
            .collect();
        Self { slots }
    }

    pub fn producer(self: &Arc<Self>) -> RingProducer {
        RingProducer {
            ring: Arc::clone(self),
            index: 0,
            overflow_count: 0,
        }
    }

    pub fn consumer(self: &Arc<Self>) -> RingConsumer {
        RingConsumer {
            ring: Arc::clone(self),
            index: 0,
        }
    }

    fn slot(&self, index: usize) -> &Arc<Mutex<Slot>> {
        &self.slots[index % self.slots.len()]
    }
}

/// The producer side: fills the slot it currently holds, then tries to
/// advance. On failure to acquire the next slot it drops the current
/// buffer's contents and counts an overflow.
pub struct RingProducer {
    ring: Arc<SampleRing>,
    index: usize,
    overflow_count: u64,
}

impl RingProducer {
    /// Writes `samples` (interleaved IQ) into the current slot and attempts
    /// to hand it off to the consumer. Returns `true` on success, `false`
    /// if the consumer is behind and the buffer was dropped (overflow).
    pub fn publish(&mut self, samples: &[f64]) -> bool {
        let current = self.ring.slot(self.index);
        {
            let mut guard: MutexGuard<'_, Slot> = current.lock().expect("ring slot mutex poisoned");
            let n = samples.len().min(guard.buffer.len());
            guard.buffer[..n].copy_from_slice(&samples[..n]);
            guard.len = n;
        }

        let next_index = self.index + 1;
        match self.ring.slot(next_index).try_lock() {
            Ok(_next_guard) => {
                self.index = next_index;
                true
            }
            Err(_) => {
                self.overflow_count += 1;
                false
            }
        }
    }

    pub fn overflow_count(&self) -> u64 {
        self.overflow_count
    }
}

/// The consumer side: drains slots in order, blocking on each slot's mutex.
pub struct RingConsumer {
    ring: Arc<SampleRing>,
    index: usize,
}

impl RingConsumer {
    /// Copies the next slot's contents into `out`, returning the number of
    /// samples copied (0 if the slot was never published).
    pub fn take(&mut self, out: &mut Vec<f64>) -> usize {
        let slot = self.ring.slot(self.index);
        let n = {
            let guard = slot.lock().expect("ring slot mutex poisoned");
            out.clear();
            out.extend_from_slice(&guard.buffer[..guard.len]);
            guard.len
        };
        self.index += 1;
        n
    }
}
