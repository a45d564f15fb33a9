//! Payseal - Client-Side Payment Field Toolkit
//!
//! This crate formats, validates and encrypts payment form fields described
//! by a payment gateway, so that plaintext card data never leaves the client
//! process unprotected.

pub mod adapters;
pub mod application;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod ports;
