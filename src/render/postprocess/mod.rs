//! 后处理模块
//!
//! 目前只有一条通路：场景 HDR 目标经过 Bloom（辉光）链合成到表面。

pub mod bloom;

pub use bloom::BloomPass;
