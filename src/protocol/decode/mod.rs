//! Result decoding from native cells to protocol accessor semantics.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `accessor` | typed accessors, numeric widening/narrowing, host containers |
//! | `timestamp` | date/time folding into millisecond instants |

pub mod accessor;
mod timestamp;

pub use timestamp::{date_to_timestamp, normalize_timestamp, time_to_timestamp, timestamp_from_millis};
