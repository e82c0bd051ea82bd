//! Test support: an accumulating sink for asserting on dispatched records

pub mod sink;

pub use sink::RecordingSink;
