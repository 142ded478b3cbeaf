//! Repository interfaces for persistence, implemented by the infra layer.

pub mod account;

pub use account::{AccountRepository, MockAccountRepository};
