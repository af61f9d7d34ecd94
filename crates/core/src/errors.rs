use thiserror::Error;

use crate::models::{Speciality, StaffId};

/// 调度器错误类型定义
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("员工未在岗: {id}")]
    NotOnDuty { id: StaffId },

    #[error("没有可处理专长 {speciality} 的在岗员工")]
    NoAvailableWorker { speciality: Speciality },

    #[error("订单在收到内容前中止 (专长: {speciality}): {reason}")]
    OrderAborted { speciality: Speciality, reason: String },

    #[error("员工 {id} 在返回结果前中止: {reason}")]
    WorkerAborted { id: StaffId, reason: String },

    #[error("未知的事件类型: {0}")]
    UnknownEventType(String),

    #[error("无效的事件: {0}")]
    InvalidEvent(String),

    #[error("通道已关闭")]
    ChannelClosed,
}

impl DispatchError {
    /// 用于指标标签的简短错误名
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::NotOnDuty { .. } => "not_on_duty",
            DispatchError::NoAvailableWorker { .. } => "no_available_worker",
            DispatchError::OrderAborted { .. } => "order_aborted",
            DispatchError::WorkerAborted { .. } => "worker_aborted",
            DispatchError::UnknownEventType(_) => "unknown_event_type",
            DispatchError::InvalidEvent(_) => "invalid_event",
            DispatchError::ChannelClosed => "channel_closed",
        }
    }
}
