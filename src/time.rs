use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **milliseconds since the Unix epoch**;
/// the generator subtracts its own configured epoch before encoding.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

/// The system wall clock.
///
/// Reads [`SystemTime::now`] on every call. The clock is allowed to jump
/// backwards (NTP step, manual adjustment); the generator detects that and
/// refuses to mint rather than papering over it, so no monotonic shadow clock
/// is layered on top.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as i64
    }
}
