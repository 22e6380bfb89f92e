//! Package index queries.
//!
//! - [`client`] - Name search against the package index
//! - [`xmlrpc`] - The XML-RPC encoding the index speaks

pub mod client;
pub mod xmlrpc;

pub use client::{records_from, ModuleRecord, PackageIndex, PackageIndexClient, DEFAULT_INDEX_URL};
