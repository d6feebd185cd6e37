//! Voice Context - 音色与音频格式

mod value_objects;

pub use value_objects::{AudioFormat, VoiceInfo};
