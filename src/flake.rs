use crate::error::Error;
use crate::radix64;
use chrono::prelude::*;
use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

/// bit length of the time bucket (whole seconds since the epoch)
pub(crate) const BIT_LEN_TIME: u64 = 32;
/// bit length of the datacenter id
pub(crate) const BIT_LEN_DATACENTER_ID: u64 = 4;
/// bit length of the worker id
pub(crate) const BIT_LEN_WORKER_ID: u64 = 4;
/// bit length of the sequence number
pub(crate) const BIT_LEN_SEQUENCE: u64 = 12;
/// total bit length of a packed id
pub(crate) const BIT_LEN_ID: u64 =
    BIT_LEN_TIME + BIT_LEN_DATACENTER_ID + BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE;
/// mask for the sequence number
pub(crate) const MASK_SEQUENCE: u16 = (1 << BIT_LEN_SEQUENCE) - 1;
/// mask for the datacenter id of a decomposed id
const MASK_DATACENTER_ID: u64 = (1 << BIT_LEN_DATACENTER_ID) - 1;
/// mask for the worker id of a decomposed id
const MASK_WORKER_ID: u64 = (1 << BIT_LEN_WORKER_ID) - 1;

const SHIFT_TIME: u64 = BIT_LEN_DATACENTER_ID + BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE;
const SHIFT_GENERATOR_ID: u64 = BIT_LEN_SEQUENCE;

/// Clock state of a generator: the second bucket of the most recent id and
/// the in-bucket sequence counter.
/// This struct is not exposed to the public.
#[derive(Debug)]
pub(crate) struct Internals {
    pub(crate) last_time_bucket: i64,
    pub(crate) sequence: u16,
    pub(crate) overflowing: bool,
}

/// SharedFlake is shared between FlakeId handles.
/// The identity fields are frozen at build time; only `internals` mutates.
/// This struct is not exposed to the public.
pub(crate) struct SharedFlake {
    pub(crate) epoch_millis: i64,
    pub(crate) datacenter_id: u8,
    pub(crate) worker_id: u8,
    pub(crate) internals: Mutex<Internals>,
}

impl SharedFlake {
    /// The 8-bit generator identifier: datacenter in the high nibble,
    /// worker in the low nibble.
    pub(crate) fn generator_id(&self) -> u8 {
        (self.datacenter_id << 4) | self.worker_id
    }
}

/// FlakeId is a distributed unique ID generator.
/// It is thread-safe and can be cloned to be used in multiple threads.
///
/// Ids are 52-bit integers packed most-significant-first as
/// `timestamp(32) | datacenter(4) | worker(4) | sequence(12)`, where the
/// timestamp counts whole seconds since the configured epoch.
pub struct FlakeId(pub(crate) Arc<SharedFlake>);

impl FlakeId {
    /// Create a new [`Builder`] to construct a FlakeId.
    ///
    /// [`Builder`]: crate::Builder
    pub fn builder() -> crate::Builder {
        crate::Builder::new()
    }

    /// Create a new FlakeId with the given SharedFlake.
    pub(crate) fn new_inner(shared: Arc<SharedFlake>) -> Self {
        Self(shared)
    }

    /// The configured epoch, in milliseconds since the Unix epoch.
    pub fn epoch_millis(&self) -> i64 {
        self.0.epoch_millis
    }

    /// The configured datacenter id.
    pub fn datacenter_id(&self) -> u8 {
        self.0.datacenter_id
    }

    /// The configured worker id.
    pub fn worker_id(&self) -> u8 {
        self.0.worker_id
    }

    /// Generate the next unique id.
    ///
    /// At most 4096 ids can be minted per second bucket; when the sequence
    /// is exhausted the call waits for the next wall-clock second and
    /// retries, so exhaustion shows up as latency (bounded by ~1s), never
    /// as an error. Fails with [`Error::OverTimeLimit`] once the bucket no
    /// longer fits in 32 bits.
    pub fn next_id(&self) -> Result<Id, Error> {
        loop {
            let mut internals = self.0.internals.lock().map_err(|_| Error::MutexPoisoned)?;

            let now = Utc::now().timestamp_millis();
            let bucket = (now - self.0.epoch_millis).div_euclid(1000);

            if bucket == internals.last_time_bucket {
                if internals.overflowing {
                    drop(internals);
                    thread::sleep(backoff(now));
                    continue;
                }
                internals.sequence = (internals.sequence + 1) & MASK_SEQUENCE;
                if internals.sequence == 0 {
                    // All 4096 sequence values of this bucket are spent.
                    // The wrapped value is discarded, not emitted.
                    internals.overflowing = true;
                    drop(internals);
                    thread::sleep(backoff(now));
                    continue;
                }
            } else {
                internals.overflowing = false;
                internals.sequence = 0;
                internals.last_time_bucket = bucket;
            }

            if !(0..1 << BIT_LEN_TIME).contains(&bucket) {
                return Err(Error::OverTimeLimit);
            }

            return Ok(Id::new(
                (bucket as u64) << SHIFT_TIME
                    | (self.0.generator_id() as u64) << SHIFT_GENERATOR_ID
                    | internals.sequence as u64,
            ));
        }
    }

    /// Break an id up into its parts.
    ///
    /// Decoding is pure: it reads only the frozen identity (for the epoch)
    /// and never touches the clock state, so any number of calls may run
    /// concurrently. Fails with [`Error::IdOutOfRange`] for values that do
    /// not fit in 52 bits.
    pub fn decode(&self, id: u64) -> Result<DecomposedId, Error> {
        if id >= 1 << BIT_LEN_ID {
            return Err(Error::IdOutOfRange(id));
        }

        let timestamp = id >> SHIFT_TIME;
        let datacenter_id = (id >> (BIT_LEN_WORKER_ID + BIT_LEN_SEQUENCE)) & MASK_DATACENTER_ID;
        let worker_id = (id >> BIT_LEN_SEQUENCE) & MASK_WORKER_ID;
        let sequence = id & MASK_SEQUENCE as u64;

        let created_at_millis = self.0.epoch_millis + (timestamp as i64) * 1000;
        let created_at = Utc
            .timestamp_millis_opt(created_at_millis)
            .single()
            .ok_or(Error::IdOutOfRange(id))?;

        Ok(DecomposedId {
            id,
            timestamp: Rendered::new(timestamp),
            sequence: Rendered::new(sequence),
            datacenter_id: Rendered::new(datacenter_id),
            worker_id: Rendered::new(worker_id),
            epoch_millis: self.0.epoch_millis,
            created_at,
        })
    }

    /// Decode an id given as a string in the given base.
    ///
    /// Base `64` is routed through the radix-64 codec; bases `2..=36` are
    /// parsed as ordinary integers. Any other base fails with
    /// [`Error::UnsupportedBase`].
    pub fn decode_str(&self, input: &str, base: u32) -> Result<DecomposedId, Error> {
        let id = match base {
            64 => radix64::decode(input)?,
            2..=36 => u64::from_str_radix(input, base).map_err(|_| Error::InvalidNumber {
                input: input.to_owned(),
                base,
            })?,
            _ => return Err(Error::UnsupportedBase(base)),
        };
        self.decode(id)
    }
}

/// Returns a new `FlakeId` referencing the same state as `self`.
/// This is used for concurrent use.
impl Clone for FlakeId {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Sleep duration to the next wall-clock second boundary.
fn backoff(now_millis: i64) -> Duration {
    Duration::from_millis((1000 - now_millis.rem_euclid(1000)) as u64)
}

/// A generated 52-bit id together with its string renderings.
///
/// The renderings are pure functions of the value; consumers typically
/// transport the radix-64 form as an opaque correlation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Id {
    value: u64,
}

impl Id {
    pub(crate) fn new(value: u64) -> Self {
        Self { value }
    }

    /// The raw packed integer.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Binary rendering, without leading zeros.
    pub fn base2(&self) -> String {
        format!("{:b}", self.value)
    }

    /// Decimal rendering.
    pub fn base10(&self) -> String {
        self.value.to_string()
    }

    /// Radix-64 rendering.
    pub fn base64(&self) -> String {
        // A 52-bit value is always below the codec ceiling.
        radix64::encode_raw(self.value)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A field value of a decomposed id with its alternate renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub num: u64,
    pub base2: String,
    pub base10: String,
    pub base64: String,
}

impl Rendered {
    fn new(num: u64) -> Self {
        Self {
            num,
            base2: format!("{num:b}"),
            base10: num.to_string(),
            base64: radix64::encode_raw(num),
        }
    }
}

/// DecomposedId is the parts of a flake id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedId {
    pub id: u64,
    /// Seconds since the configured epoch.
    pub timestamp: Rendered,
    pub sequence: Rendered,
    pub datacenter_id: Rendered,
    pub worker_id: Rendered,
    /// The epoch of the generator that decoded this id, in milliseconds.
    pub epoch_millis: i64,
    /// Absolute creation time, `epoch + timestamp * 1000` ms.
    pub created_at: DateTime<Utc>,
}
