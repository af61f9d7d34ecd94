use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    models::{Speciality, StaffId},
    traits::Channel,
    DispatchError, DispatchResult,
};

pub const STAFF_ON_DUTY: &str = "staff.onduty";
pub const STAFF_OFF_DUTY: &str = "staff.offduty";
pub const ORDER: &str = "order";

/// 调度器接收的事件
///
/// 员工上岗与订单事件绑定在各自的通道上；下岗事件只携带员工标识。
#[derive(Clone)]
pub enum DispatchEvent {
    StaffOnDuty {
        id: StaffId,
        specialities: BTreeSet<Speciality>,
        channel: Arc<dyn Channel>,
    },
    StaffOffDuty {
        id: StaffId,
    },
    Order {
        speciality: Speciality,
        channel: Arc<dyn Channel>,
    },
}

/// 传输层送来的原始事件描述
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Scope {
    #[serde(rename = "staff.onduty")]
    StaffOnDuty {
        #[serde(alias = "identity")]
        id: StaffId,
        #[serde(alias = "capabilities")]
        speciality: Vec<Speciality>,
    },
    #[serde(rename = "staff.offduty")]
    StaffOffDuty {
        #[serde(alias = "identity")]
        id: StaffId,
    },
    #[serde(rename = "order")]
    Order { speciality: Speciality },
}

impl DispatchEvent {
    /// 构造员工上岗事件
    pub fn staff_on_duty<I, S>(id: impl Into<StaffId>, tags: I, channel: Arc<dyn Channel>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Speciality>,
    {
        DispatchEvent::StaffOnDuty {
            id: id.into(),
            specialities: crate::models::specialities(tags),
            channel,
        }
    }

    /// 构造员工下岗事件
    pub fn staff_off_duty(id: impl Into<StaffId>) -> Self {
        DispatchEvent::StaffOffDuty { id: id.into() }
    }

    /// 构造订单事件
    pub fn order(speciality: impl Into<Speciality>, channel: Arc<dyn Channel>) -> Self {
        DispatchEvent::Order {
            speciality: speciality.into(),
            channel,
        }
    }

    /// 从JSON事件描述解析事件
    ///
    /// `type` 字段决定事件种类，未知种类返回 [`DispatchError::UnknownEventType`]，
    /// 已知种类但字段缺失或通道缺失返回 [`DispatchError::InvalidEvent`]。
    pub fn from_scope(scope: &Value, channel: Option<Arc<dyn Channel>>) -> DispatchResult<Self> {
        let event_type = scope.get("type").and_then(Value::as_str).ok_or_else(|| {
            DispatchError::UnknownEventType(
                scope
                    .get("type")
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "<missing>".to_string()),
            )
        })?;

        if ![STAFF_ON_DUTY, STAFF_OFF_DUTY, ORDER].contains(&event_type) {
            return Err(DispatchError::UnknownEventType(event_type.to_string()));
        }

        let parsed = Scope::deserialize(scope)
            .map_err(|e| DispatchError::InvalidEvent(format!("{event_type}: {e}")))?;

        let require_channel = |channel: Option<Arc<dyn Channel>>| {
            channel.ok_or_else(|| {
                DispatchError::InvalidEvent(format!("{event_type}: 事件未绑定通道"))
            })
        };

        let event = match parsed {
            Scope::StaffOnDuty { id, speciality } => DispatchEvent::StaffOnDuty {
                id,
                specialities: speciality.into_iter().collect(),
                channel: require_channel(channel)?,
            },
            Scope::StaffOffDuty { id } => DispatchEvent::StaffOffDuty { id },
            Scope::Order { speciality } => DispatchEvent::Order {
                speciality,
                channel: require_channel(channel)?,
            },
        };

        Ok(event)
    }

    /// 校验事件内容
    pub fn validate(&self) -> DispatchResult<()> {
        match self {
            DispatchEvent::StaffOnDuty {
                id, specialities, ..
            } => {
                if id.as_str().is_empty() {
                    return Err(DispatchError::InvalidEvent("员工标识不能为空".to_string()));
                }
                if specialities.is_empty() {
                    return Err(DispatchError::InvalidEvent(format!(
                        "员工 {id} 的专长集合不能为空"
                    )));
                }
            }
            DispatchEvent::StaffOffDuty { id } => {
                if id.as_str().is_empty() {
                    return Err(DispatchError::InvalidEvent("员工标识不能为空".to_string()));
                }
            }
            DispatchEvent::Order { speciality, .. } => {
                if speciality.as_str().is_empty() {
                    return Err(DispatchError::InvalidEvent("订单专长不能为空".to_string()));
                }
            }
        }
        Ok(())
    }

    /// 事件种类名称
    pub fn event_type(&self) -> &'static str {
        match self {
            DispatchEvent::StaffOnDuty { .. } => STAFF_ON_DUTY,
            DispatchEvent::StaffOffDuty { .. } => STAFF_OFF_DUTY,
            DispatchEvent::Order { .. } => ORDER,
        }
    }
}

impl fmt::Debug for DispatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchEvent::StaffOnDuty {
                id, specialities, ..
            } => f
                .debug_struct("StaffOnDuty")
                .field("id", id)
                .field("specialities", specialities)
                .finish_non_exhaustive(),
            DispatchEvent::StaffOffDuty { id } => {
                f.debug_struct("StaffOffDuty").field("id", id).finish()
            }
            DispatchEvent::Order { speciality, .. } => f
                .debug_struct("Order")
                .field("speciality", speciality)
                .finish_non_exhaustive(),
        }
    }
}
