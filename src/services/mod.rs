//! 业务服务模块

pub mod relay;

pub use relay::ContactRelay;
