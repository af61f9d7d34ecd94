use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use roster_core::{Channel, DispatchError, DispatchResult, Payload};

/// 内存通道实现
///
/// 使用 Tokio unbounded channel 连接一对端点，适用于嵌入式部署和测试。
/// 一端关闭或被丢弃后，另一端的 `receive` 在取完剩余消息后返回 `None`，
/// `send` 返回 [`DispatchError::ChannelClosed`]。
#[derive(Debug)]
pub struct MemoryChannel {
    name: String,
    sender: Mutex<Option<mpsc::UnboundedSender<Payload>>>,
    /// 接收端在 await 期间需要持锁，因此使用 Tokio 的互斥锁
    receiver: tokio::sync::Mutex<mpsc::UnboundedReceiver<Payload>>,
    /// 本端关闭信号，唤醒正在等待消息的 `receive`
    closed: watch::Sender<bool>,
}

impl MemoryChannel {
    /// 创建一对互相连接的端点
    pub fn pair(name: impl Into<String>) -> (MemoryChannel, MemoryChannel) {
        let name = name.into();
        let (left_tx, right_rx) = mpsc::unbounded_channel();
        let (right_tx, left_rx) = mpsc::unbounded_channel();

        let left = MemoryChannel {
            name: format!("{name}/near"),
            sender: Mutex::new(Some(left_tx)),
            receiver: tokio::sync::Mutex::new(left_rx),
            closed: watch::Sender::new(false),
        };
        let right = MemoryChannel {
            name: format!("{name}/far"),
            sender: Mutex::new(Some(right_tx)),
            receiver: tokio::sync::Mutex::new(right_rx),
            closed: watch::Sender::new(false),
        };
        (left, right)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 关闭本端：对端不会再收到消息，也无法再向本端发送
    ///
    /// 不等待接收锁。若另一任务正在 `receive`，由它在被唤醒后关闭接收端，
    /// 已缓冲的消息仍可取出。
    pub fn close(&self) {
        self.sender.lock().take();
        self.closed.send_replace(true);
        if let Ok(mut receiver) = self.receiver.try_lock() {
            receiver.close();
        }
        debug!("内存通道 {} 已关闭", self.name);
    }

    /// 对端是否已不再接收消息
    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .as_ref()
            .map_or(true, |sender| sender.is_closed())
    }
}

#[async_trait]
impl Channel for MemoryChannel {
    async fn receive(&self) -> DispatchResult<Option<Payload>> {
        let closed = self.closed.subscribe();
        let mut receiver = self.receiver.lock().await;

        tokio::select! {
            biased;
            _ = closing(closed) => {}
            message = receiver.recv() => return Ok(message),
        }

        // 本端已关闭，只取出已缓冲的消息
        receiver.close();
        Ok(receiver.recv().await)
    }

    async fn send(&self, message: Payload) -> DispatchResult<()> {
        let sender = self.sender.lock().clone();
        match sender {
            Some(sender) => sender.send(message).map_err(|_| DispatchError::ChannelClosed),
            None => Err(DispatchError::ChannelClosed),
        }
    }
}

/// 等待本端被关闭
async fn closing(mut closed: watch::Receiver<bool>) {
    while !*closed.borrow_and_update() {
        if closed.changed().await.is_err() {
            return;
        }
    }
}
