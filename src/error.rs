use thiserror::Error;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowmint` can emit.
///
/// Construction-time variants (`InvalidBitLayout`, `DatacenterIdOutOfRange`,
/// `WorkerIdOutOfRange`) are never recovered automatically: a config that
/// fails validation cannot mint ids. `ClockMovedBackwards` is fatal for the
/// failing call only; the generator state is left untouched and the caller
/// decides whether to retry after a delay or abort.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The configured component widths leave no room for the timestamp field
    /// within the 63 usable bits (the sign bit stays zero).
    #[error("bit layout allocates {total} component bits, leaving no room for the timestamp")]
    InvalidBitLayout { total: u32 },

    /// The datacenter id does not fit in `datacenter_id_bits`.
    #[error("datacenter id {id} out of range (0..={max})")]
    DatacenterIdOutOfRange { id: i64, max: i64 },

    /// The worker id does not fit in `worker_id_bits`.
    #[error("worker id {id} out of range (0..={max})")]
    WorkerIdOutOfRange { id: i64, max: i64 },

    /// The wall clock was observed behind the last minted timestamp.
    ///
    /// Minting with a stale timestamp could reissue a (timestamp, sequence)
    /// pair, so the call is refused instead.
    #[error("clock moved backwards; refusing to generate an id for {backwards_ms} ms")]
    ClockMovedBackwards { backwards_ms: i64 },
}
