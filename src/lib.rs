//! Mingzi - Chinese Name Generator Backend
//!
//! This crate serves the API behind an AI-assisted Chinese name generator:
//! credit-gated certificate exports, hosted checkout for credit packs and
//! subscriptions, balance and history reads, and client analytics intake.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
