//! bm-azure: Azure SDK adapter for blobmirror
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the Azure Storage SDK. It is the only crate that directly
//! depends on the Azure SDK.

pub mod client;

pub use client::AzureBlobStore;
