use core::cmp::Ordering;

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, GeneratorConfig, Result,
    time::{SystemClock, TimeSource},
};

/// Mutable sequencer state, exclusively owned by the generator's mutex.
#[derive(Clone, Copy, Debug)]
struct State {
    /// Last millisecond for which an id was minted; -1 = never minted.
    last_timestamp: i64,
    /// Counter within `last_timestamp`, in `[0, max_sequence]`.
    sequence: i64,
}

/// A lock-based Snowflake-style ID generator suitable for multi-threaded
/// environments.
///
/// The generator owns its `(last_timestamp, sequence)` state behind a single
/// [`Mutex`]; every call to [`next_id`] runs as one atomic critical section,
/// so ids from one instance are strictly unique and non-decreasing in
/// completion order. Generators with distinct `(datacenter, worker)` pairs
/// share no state and run fully in parallel.
///
/// When the in-millisecond sequence space is exhausted, [`next_id`] blocks the
/// calling thread with a bounded busy-wait on the clock (typically ≤ 1 ms)
/// rather than failing. A wall clock observed behind the last minted
/// timestamp, however, is refused with [`Error::ClockMovedBackwards`].
///
/// # Example
/// ```
/// use snowmint::{GeneratorConfig, SnowflakeGenerator};
///
/// let config = GeneratorConfig::new(1, 1).unwrap();
/// let generator = SnowflakeGenerator::new(config);
///
/// let id = generator.next_id().unwrap();
/// let parts = generator.config().decompose(id);
/// assert_eq!(parts.datacenter_id, 1);
/// assert_eq!(parts.worker_id, 1);
/// ```
///
/// [`next_id`]: SnowflakeGenerator::next_id
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    config: GeneratorConfig,
    state: Mutex<State>,
    time: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator driven by the system wall clock.
    ///
    /// The state starts unminted (`last_timestamp = -1`, `sequence = 0`); the
    /// first call to [`Self::next_id`] picks up the current time.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_time_source(config, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator with an injected [`TimeSource`].
    ///
    /// Useful for tests and for hosts that maintain their own clock.
    pub fn with_time_source(config: GeneratorConfig, time: T) -> Self {
        Self::from_components(config, -1, 0, time)
    }

    /// Creates a generator from explicit state components.
    ///
    /// Primarily useful for controlling the starting point of the sequencer
    /// in tests. In typical use, prefer [`Self::new`] and let the first call
    /// initialize the state.
    pub fn from_components(
        config: GeneratorConfig,
        last_timestamp: i64,
        sequence: i64,
        time: T,
    ) -> Self {
        Self {
            config,
            state: Mutex::new(State {
                last_timestamp,
                sequence,
            }),
            time,
        }
    }

    /// The immutable config this generator encodes ids with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Last millisecond for which an id was minted (-1 = never).
    pub fn last_timestamp(&self) -> i64 {
        self.state.lock().last_timestamp
    }

    /// Current in-millisecond sequence value.
    pub fn sequence(&self) -> i64 {
        self.state.lock().sequence
    }

    /// Generates the next unique, time-ordered id.
    ///
    /// Callable concurrently from any number of threads. If the sequence
    /// space for the current millisecond is exhausted, the call blocks
    /// (busy-polling the clock while holding the lock) until the clock
    /// advances; this is deliberate backpressure, not an error, and a blocked
    /// call always completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockMovedBackwards`] if the clock reads earlier than
    /// the last minted timestamp. The state is left unchanged, so the caller
    /// may retry once the clock has caught up.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<i64> {
        let mut state = self.state.lock();
        // The clock read belongs inside the critical section: read before the
        // lock, a caller can observe a reading older than a timestamp another
        // caller minted with in between, which looks like a regression.
        let mut now = self.time.current_millis();

        match now.cmp(&state.last_timestamp) {
            Ordering::Less => return Err(Self::cold_clock_behind(now, state.last_timestamp)),
            Ordering::Equal => {
                state.sequence = (state.sequence + 1) & self.config.max_sequence();
                if state.sequence == 0 {
                    // Sequence space exhausted for this tick; hold the lock
                    // so no other caller can observe the wrapped counter.
                    now = self.spin_until_next_millis(state.last_timestamp);
                }
            }
            Ordering::Greater => state.sequence = 0,
        }

        state.last_timestamp = now;
        Ok(self.config.encode(now, state.sequence))
    }

    /// Busy-polls the clock until it advances past `last_timestamp`.
    ///
    /// Bounded by clock resolution (typically ≤ 1 ms).
    fn spin_until_next_millis(&self, last_timestamp: i64) -> i64 {
        let mut now = self.time.current_millis();
        while now <= last_timestamp {
            core::hint::spin_loop();
            now = self.time.current_millis();
        }
        now
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: i64, last_timestamp: i64) -> Error {
        debug_assert!(now < last_timestamp);
        Error::ClockMovedBackwards {
            backwards_ms: last_timestamp - now,
        }
    }
}
