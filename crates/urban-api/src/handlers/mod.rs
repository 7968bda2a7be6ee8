//! HTTP request handlers

pub mod trip;
