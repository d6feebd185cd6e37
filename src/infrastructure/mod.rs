//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及命令行入口

pub mod adapters;
pub mod cli;
pub mod factory;

pub use factory::{ProviderConfig, ProviderFactory};
