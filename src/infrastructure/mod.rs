//! Adapters for the domain ports: stores, the payment gateway client, and
//! the SMTP mail transport.

pub mod in_memory;
pub mod razorpay;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod smtp;
