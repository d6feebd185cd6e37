//! Domain Layer - 领域层
//!
//! - voice: 音频格式与音色信息
//! - ssml: SSML 文档构建

pub mod ssml;
pub mod voice;
