// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// The error type for this crate.
///
/// Configuration failures (`EpochAheadOfCurrentTime` through
/// `MissingWorkerId`) are fatal and surface from [`Builder::finalize`];
/// `NotConfigured` is a programmer error reported by the [`global`] module;
/// the remaining codec and decode variants are recoverable by the caller.
/// Sequence exhaustion is never an error: `next_id` absorbs it as a bounded
/// wait for the next second.
///
/// [`Builder::finalize`]: crate::Builder::finalize
/// [`global`]: crate::global
#[derive(Error, Debug)]
pub enum Error {
    #[error("epoch `{0}` is ahead of current time")]
    EpochAheadOfCurrentTime(i64),
    #[error("epoch must not be negative, got `{0}`")]
    NegativeEpoch(i64),
    #[error("datacenter id {0} is greater than the max allowed value 15")]
    DatacenterIdOutOfRange(u8),
    #[error("worker id {0} is greater than the max allowed value 15")]
    WorkerIdOutOfRange(u8),
    #[error("datacenter id was not provided")]
    MissingDatacenterId,
    #[error("worker id was not provided")]
    MissingWorkerId,
    #[error("generator has not been configured")]
    NotConfigured,
    #[error("number `{0}` exceeds the safe encodable range")]
    NumberTooLarge(u64),
    #[error("radix-64 input is empty")]
    EmptyRadix64,
    #[error("`{0}` is not a digit of the radix-64 alphabet")]
    InvalidRadix64Digit(char),
    #[error("radix-64 input is {0} digits long, the maximum is 9")]
    Radix64TooLong(usize),
    #[error("`{input}` is not a valid base-{base} integer")]
    InvalidNumber { input: String, base: u32 },
    #[error("base `{0}` is not supported, expected 2..=36 or 64")]
    UnsupportedBase(u32),
    #[error("id `{0}` does not fit in 52 bits")]
    IdOutOfRange(u64),
    #[error("over the time limit")]
    OverTimeLimit,
    #[error("mutex is poisoned (i.e. a panic happened while it was locked)")]
    MutexPoisoned,
}
