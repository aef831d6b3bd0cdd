//! 中间件模块

pub mod cors;

pub use cors::apply_cors_headers;
