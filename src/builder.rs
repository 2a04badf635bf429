use crate::error::Error;
use crate::flake::{FlakeId, Internals, SharedFlake};
use chrono::prelude::*;
use std::sync::{Arc, Mutex};

/// Datacenter and worker ids are 4-bit fields.
const MAX_DATACENTER_ID: u8 = 15;
const MAX_WORKER_ID: u8 = 15;

/// Default epoch: 2021-01-01T00:00:00Z.
const DEFAULT_EPOCH_MILLIS: i64 = 1_609_459_200_000;

/// A builder for the [`FlakeId`] generator.
///
/// The epoch, datacenter id and worker id form the generator's identity;
/// they are validated once by [`finalize`] and frozen for the lifetime of
/// the generator.
///
/// [`FlakeId`]: crate::FlakeId
/// [`finalize`]: Builder::finalize
pub struct Builder {
    epoch_millis: Option<i64>,
    datacenter_id: Option<u8>,
    worker_id: Option<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    /// Construct a new builder for the build of [`FlakeId`].
    ///
    /// [`FlakeId`]: crate::FlakeId
    pub fn new() -> Self {
        Self {
            epoch_millis: None,
            datacenter_id: None,
            worker_id: None,
        }
    }

    /// Set the epoch from a timestamp.
    /// If the time is set later than the current time, `finalize` will fail.
    pub fn epoch(self, epoch: DateTime<Utc>) -> Self {
        self.epoch_millis(epoch.timestamp_millis())
    }

    /// Set the epoch in milliseconds since the Unix epoch.
    /// If the value is negative or later than the current time, `finalize`
    /// will fail.
    pub fn epoch_millis(mut self, epoch_millis: i64) -> Self {
        self.epoch_millis = Some(epoch_millis);
        self
    }

    /// Set the datacenter id. Values above 15 make `finalize` fail.
    pub fn datacenter_id(mut self, datacenter_id: u8) -> Self {
        self.datacenter_id = Some(datacenter_id);
        self
    }

    /// Set the worker id. Values above 15 make `finalize` fail.
    pub fn worker_id(mut self, worker_id: u8) -> Self {
        self.worker_id = Some(worker_id);
        self
    }

    /// Finish building and create a FlakeId instance.
    /// This method will return an error if validation of the identity fails.
    pub fn finalize(self) -> Result<FlakeId, Error> {
        let epoch_millis = match self.epoch_millis {
            Some(epoch_millis) => {
                if epoch_millis < 0 {
                    return Err(Error::NegativeEpoch(epoch_millis));
                }
                if epoch_millis > Utc::now().timestamp_millis() {
                    return Err(Error::EpochAheadOfCurrentTime(epoch_millis));
                }
                epoch_millis
            }
            None => DEFAULT_EPOCH_MILLIS,
        };

        let datacenter_id = self.datacenter_id.ok_or(Error::MissingDatacenterId)?;
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(Error::DatacenterIdOutOfRange(datacenter_id));
        }

        let worker_id = self.worker_id.ok_or(Error::MissingWorkerId)?;
        if worker_id > MAX_WORKER_ID {
            return Err(Error::WorkerIdOutOfRange(worker_id));
        }

        let shared = Arc::new(SharedFlake {
            epoch_millis,
            datacenter_id,
            worker_id,
            internals: Mutex::new(Internals {
                last_time_bucket: -1,
                sequence: 0,
                overflowing: false,
            }),
        });
        Ok(FlakeId::new_inner(shared))
    }
}
