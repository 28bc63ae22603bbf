//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod data_source;
pub mod events;
pub mod http;
pub mod memory;
pub mod remote;

pub use data_source::{DataSource, DataSourceMode};
pub use events::EventPublisher;
