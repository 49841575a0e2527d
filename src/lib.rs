//! Stipend engine for travel pay offers
//!
//! This crate splits travel work offers into a tax-free per diem stipend and
//! taxable wages, measured against the federal GSA lodging and M&IE ceiling.
//! It accepts bundled weekly offers (healthcare staffing) and hourly offers
//! with a separate daily per diem (construction trades), and derives housing
//! surplus, negotiation bands, an offer verdict, insurance estimates and a
//! contract projection from the same normalized breakdown.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
