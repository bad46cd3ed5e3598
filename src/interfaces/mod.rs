//! Inbound/outbound interfaces: the REST API and the CSV admin export.

pub mod csv;
pub mod http;
