// demos/storefront_app/src/services/mod.rs

//! Side services the web layer calls into: the simulated payment gateway
//! and the demo catalog seeder.

pub mod payment_mock;
pub mod seed;
