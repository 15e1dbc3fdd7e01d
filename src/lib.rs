//! `snowmint`: monotonic, collision-resistant unique id generation.
//!
//! The core is a Snowflake-style generator: one 64-bit id packs a timestamp
//! delta, datacenter id, worker id, and in-millisecond sequence, minted under
//! a single critical section so ids from one generator are strictly unique
//! and non-decreasing in completion order. Worker/datacenter coordinates are
//! assumed to be assigned externally (configuration or a higher-level
//! coordinator); the generator validates them, it does not allocate them.
//!
//! Three lighter token modes share the same "unique token" purpose with
//! weaker guarantees: [`uuid_token`] (timestamp + random hash),
//! [`counter_token`] (timestamp + process-wide atomic counter), and
//! [`random_token`] (random alphanumeric string).
//!
//! # Example
//!
//! ```
//! use snowmint::{GeneratorConfig, SnowflakeGenerator};
//!
//! let config = GeneratorConfig::new(0, 1).expect("identity fits default layout");
//! let generator = SnowflakeGenerator::new(config);
//!
//! let id = generator.next_id().expect("clock did not move backwards");
//! assert_eq!(config.decompose(id).worker_id, 1);
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`GeneratorConfig`] and
//!   [`IdParts`].
//! - `tracing`: trace-level instrumentation of the minting hot path.

mod config;
mod error;
mod generator;
mod time;
mod token;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::time::*;
pub use crate::token::*;
