pub mod event;
pub mod staff;

pub use event::*;
pub use staff::*;

/// 在提交方、调度器与员工之间中继的消息体
pub type Payload = serde_json::Value;
