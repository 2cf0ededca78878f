//! # Data Transfer Objects
//!
//! ユースケースへの入力

pub mod batch_request;
