//! 用户存储
//!
//! 持久化技术对引擎不可见，这里提供进程内实现；
//! 对外契约是按用户聚合的原子读-改-写（见 memory 模块）。

pub mod memory;

pub use memory::MemoryUserStore;
