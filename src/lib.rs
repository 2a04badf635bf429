//! A distributed unique ID generator producing 52-bit, time-ordered flake
//! ids, in the spirit of [Twitter's Snowflake].
//!
//! A flake id packs, most-significant-first: a 32-bit timestamp (whole
//! seconds since a configurable epoch), a 4-bit datacenter id, a 4-bit
//! worker id and a 12-bit sequence number. Any id can be decoded back into
//! those fields, and every value has a compact radix-64 rendering suitable
//! for use as an opaque correlation token.
//!
//! ## Quickstart
//!
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! flake52 = "0.1"
//! ```
//!
//! Use the library like this:
//!
//! ```
//! use flake52::FlakeId;
//!
//! let flake = FlakeId::builder()
//!     .datacenter_id(3)
//!     .worker_id(7)
//!     .finalize()
//!     .unwrap();
//!
//! let id = flake.next_id().unwrap();
//! println!("{} ({})", id.value(), id.base64());
//!
//! let parts = flake.decode(id.value()).unwrap();
//! assert_eq!(parts.datacenter_id.num, 3);
//! assert_eq!(parts.worker_id.num, 7);
//! ```
//!
//! ## Concurrent use
//!
//! FlakeId is thread-safe. `clone` it before moving to another thread:
//! ```
//! use flake52::FlakeId;
//! use std::thread;
//!
//! let flake = FlakeId::builder()
//!     .datacenter_id(0)
//!     .worker_id(1)
//!     .finalize()
//!     .unwrap();
//!
//! let mut children = Vec::new();
//! for _ in 0..10 {
//!     let thread_flake = flake.clone();
//!     children.push(thread::spawn(move || {
//!         println!("{}", thread_flake.next_id().unwrap());
//!     }));
//! }
//!
//! for child in children {
//!     child.join().unwrap();
//! }
//! ```
//!
//! At most 4096 ids fit in one second bucket per generator identity; when
//! the sequence is exhausted, `next_id` waits for the next wall-clock
//! second instead of failing. For a single process-wide identity see the
//! [`global`] module.
//!
//! [Twitter's Snowflake]: https://blog.twitter.com/2010/announcing-snowflake

mod builder;
mod error;
mod flake;
pub mod global;
pub mod radix64;

pub use crate::flake::*;
pub use builder::*;
pub use error::*;
