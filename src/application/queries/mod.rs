//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：Provider、部署与音色信息

mod provider_queries;

pub mod handlers;

pub use provider_queries::*;
