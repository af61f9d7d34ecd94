use async_trait::async_trait;

use crate::{models::Payload, DispatchResult};

/// 参与方会话的双向有序消息通道
///
/// 通道由传输层创建并拥有，调度器只在一次中继期间持有它。
#[async_trait]
pub trait Channel: Send + Sync {
    /// 等待对端的下一条消息，`Ok(None)` 表示对端已结束
    async fn receive(&self) -> DispatchResult<Option<Payload>>;

    /// 向对端发送消息，通道已关闭时返回错误
    async fn send(&self, message: Payload) -> DispatchResult<()>;
}
