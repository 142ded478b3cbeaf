//! Route handlers, one module per endpoint group.

pub mod account;
