use crate::{Error, Result};

/// Default epoch: Monday, January 1, 2018 00:00:00 UTC.
pub const DEFAULT_EPOCH: i64 = 1_514_736_000_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC.
pub const TWITTER_EPOCH: i64 = 1_288_834_974_657;

/// Sign bit excluded; everything else is split between the timestamp and the
/// three component fields.
const USABLE_BITS: u32 = 63;

/// Classic Snowflake layout: 41 timestamp + 5 datacenter + 5 worker + 12
/// sequence bits.
const DEFAULT_DATACENTER_ID_BITS: u32 = 5;
const DEFAULT_WORKER_ID_BITS: u32 = 5;
const DEFAULT_SEQUENCE_BITS: u32 = 12;

const fn mask(bits: u32) -> i64 {
    // Computed in u64 so a 63-bit timestamp mask cannot overflow i64 math.
    ((1u64 << bits) - 1) as i64
}

/// Immutable identity and bit layout of one [`SnowflakeGenerator`].
///
/// A config is validated once at construction and never changes afterwards;
/// every id minted with it is bit-exact under the same layout. Two generators
/// with distinct `(datacenter_id, worker_id)` pairs (and the same layout)
/// cannot collide by construction.
///
/// The packed id layout, high bit first:
///
/// ```text
/// 1 sign bit (always 0) | timestamp delta | datacenter | worker | sequence
/// ```
///
/// where the timestamp delta is milliseconds since [`epoch_millis`].
///
/// # Example
///
/// ```
/// use snowmint::GeneratorConfig;
///
/// let config = GeneratorConfig::new(1, 7).unwrap();
/// assert_eq!(config.max_sequence(), 4095);
/// assert_eq!(config.timestamp_bits(), 41);
/// ```
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`epoch_millis`]: GeneratorConfig::epoch_millis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    epoch_millis: i64,
    datacenter_id_bits: u32,
    worker_id_bits: u32,
    sequence_bits: u32,
    datacenter_id: i64,
    worker_id: i64,
}

impl GeneratorConfig {
    /// Creates a config with the classic 5/5/12 layout and [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatacenterIdOutOfRange`] or
    /// [`Error::WorkerIdOutOfRange`] if an identity value does not fit its
    /// field.
    pub fn new(datacenter_id: i64, worker_id: i64) -> Result<Self> {
        Self::with_layout(
            DEFAULT_EPOCH,
            DEFAULT_DATACENTER_ID_BITS,
            DEFAULT_WORKER_ID_BITS,
            DEFAULT_SEQUENCE_BITS,
            datacenter_id,
            worker_id,
        )
    }

    /// Creates a config with an explicit epoch and bit layout.
    ///
    /// The timestamp field receives whatever the three component fields leave
    /// of the 63 usable bits.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBitLayout`] if the component widths sum to 63 or
    ///   more, leaving no timestamp room.
    /// - [`Error::DatacenterIdOutOfRange`] / [`Error::WorkerIdOutOfRange`] if
    ///   an identity value exceeds `(1 << bits) - 1` or is negative.
    pub fn with_layout(
        epoch_millis: i64,
        datacenter_id_bits: u32,
        worker_id_bits: u32,
        sequence_bits: u32,
        datacenter_id: i64,
        worker_id: i64,
    ) -> Result<Self> {
        match datacenter_id_bits
            .checked_add(worker_id_bits)
            .and_then(|total| total.checked_add(sequence_bits))
        {
            Some(total) if total < USABLE_BITS => {}
            // Overflowed sums are invalid layouts too, not panics.
            _ => {
                return Err(Error::InvalidBitLayout {
                    total: datacenter_id_bits
                        .saturating_add(worker_id_bits)
                        .saturating_add(sequence_bits),
                });
            }
        }

        let config = Self {
            epoch_millis,
            datacenter_id_bits,
            worker_id_bits,
            sequence_bits,
            datacenter_id,
            worker_id,
        };

        let max = config.max_datacenter_id();
        if !(0..=max).contains(&datacenter_id) {
            return Err(Error::DatacenterIdOutOfRange {
                id: datacenter_id,
                max,
            });
        }
        let max = config.max_worker_id();
        if !(0..=max).contains(&worker_id) {
            return Err(Error::WorkerIdOutOfRange { id: worker_id, max });
        }

        Ok(config)
    }

    /// The epoch subtracted from every timestamp before encoding.
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// The configured datacenter identity.
    pub const fn datacenter_id(&self) -> i64 {
        self.datacenter_id
    }

    /// The configured worker identity.
    pub const fn worker_id(&self) -> i64 {
        self.worker_id
    }

    /// Width of the derived timestamp field.
    pub const fn timestamp_bits(&self) -> u32 {
        USABLE_BITS - self.datacenter_id_bits - self.worker_id_bits - self.sequence_bits
    }

    /// Maximum encodable datacenter id.
    pub const fn max_datacenter_id(&self) -> i64 {
        mask(self.datacenter_id_bits)
    }

    /// Maximum encodable worker id.
    pub const fn max_worker_id(&self) -> i64 {
        mask(self.worker_id_bits)
    }

    /// Maximum sequence value within one millisecond; also the wraparound
    /// mask for the in-tick counter.
    pub const fn max_sequence(&self) -> i64 {
        mask(self.sequence_bits)
    }

    /// Maximum encodable timestamp delta.
    pub const fn max_timestamp(&self) -> i64 {
        mask(self.timestamp_bits())
    }

    pub(crate) const fn worker_shift(&self) -> u32 {
        self.sequence_bits
    }

    pub(crate) const fn datacenter_shift(&self) -> u32 {
        self.sequence_bits + self.worker_id_bits
    }

    pub(crate) const fn timestamp_shift(&self) -> u32 {
        self.sequence_bits + self.worker_id_bits + self.datacenter_id_bits
    }

    /// Packs a wall-clock timestamp and sequence value into an id.
    ///
    /// `timestamp_millis` is absolute (Unix milliseconds); the configured
    /// epoch is subtracted here.
    pub const fn encode(&self, timestamp_millis: i64, sequence: i64) -> i64 {
        ((timestamp_millis - self.epoch_millis) << self.timestamp_shift())
            | (self.datacenter_id << self.datacenter_shift())
            | (self.worker_id << self.worker_shift())
            | sequence
    }

    /// Splits a packed id back into its fields by inverse shift/mask.
    ///
    /// The timestamp comes back as absolute Unix milliseconds (the epoch is
    /// re-added).
    pub const fn decompose(&self, id: i64) -> IdParts {
        IdParts {
            timestamp_millis: ((id >> self.timestamp_shift()) & self.max_timestamp())
                + self.epoch_millis,
            datacenter_id: (id >> self.datacenter_shift()) & self.max_datacenter_id(),
            worker_id: (id >> self.worker_shift()) & self.max_worker_id(),
            sequence: id & self.max_sequence(),
        }
    }
}

/// Decoded view of a packed id, produced by [`GeneratorConfig::decompose`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdParts {
    /// Absolute mint time, milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    /// Datacenter field.
    pub datacenter_id: i64,
    /// Worker field.
    pub worker_id: i64,
    /// In-millisecond sequence field.
    pub sequence: i64,
}
