//! Application services

pub mod shortener;

pub use shortener::Shortener;
