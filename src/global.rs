//! Process-wide singleton variant of [`FlakeId`].
//!
//! Some deployments want exactly one generator identity per process rather
//! than an instance threaded through the call graph. This module wraps one
//! [`FlakeId`] in process-scoped shared state with explicit init/teardown.
//! Every operation fails with [`Error::NotConfigured`] until [`init`] has
//! succeeded.
//!
//! ```
//! use flake52::{global, FlakeId};
//!
//! global::init(FlakeId::builder().datacenter_id(3).worker_id(7)).unwrap();
//! let id = global::next_id().unwrap();
//! let parts = global::decode(id.value()).unwrap();
//! assert_eq!(parts.datacenter_id.num, 3);
//! global::teardown();
//! ```

use crate::error::Error;
use crate::flake::{DecomposedId, FlakeId, Id};
use crate::Builder;
use std::sync::RwLock;

static INSTANCE: RwLock<Option<FlakeId>> = RwLock::new(None);

/// Configure the process-wide generator from a [`Builder`].
///
/// Replaces any previously configured identity. Fails if the builder's
/// identity does not validate.
pub fn init(builder: Builder) -> Result<(), Error> {
    let flake = builder.finalize()?;
    let mut slot = INSTANCE.write().map_err(|_| Error::MutexPoisoned)?;
    *slot = Some(flake);
    Ok(())
}

/// Convenience form of [`init`] taking the raw identity fields.
pub fn configure(epoch_millis: i64, datacenter_id: u8, worker_id: u8) -> Result<(), Error> {
    init(
        FlakeId::builder()
            .epoch_millis(epoch_millis)
            .datacenter_id(datacenter_id)
            .worker_id(worker_id),
    )
}

/// Drop the process-wide generator. Subsequent operations fail with
/// [`Error::NotConfigured`] until [`init`] runs again.
pub fn teardown() {
    if let Ok(mut slot) = INSTANCE.write() {
        *slot = None;
    }
}

/// Generate the next unique id from the process-wide generator.
pub fn next_id() -> Result<Id, Error> {
    // Clone the Arc-backed handle so id generation (which may sleep on
    // sequence exhaustion) never holds the registry lock.
    current()?.next_id()
}

/// Decode an id against the process-wide generator's identity.
pub fn decode(id: u64) -> Result<DecomposedId, Error> {
    current()?.decode(id)
}

/// Decode an id given as a string in the given base.
pub fn decode_str(input: &str, base: u32) -> Result<DecomposedId, Error> {
    current()?.decode_str(input, base)
}

fn current() -> Result<FlakeId, Error> {
    let slot = INSTANCE.read().map_err(|_| Error::MutexPoisoned)?;
    slot.as_ref().cloned().ok_or(Error::NotConfigured)
}
