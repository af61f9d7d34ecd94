use std::sync::Arc;
use std::time::Duration;

use roster_core::{Channel, DispatchError};
use roster_infrastructure::MemoryChannel;
use serde_json::json;

#[tokio::test]
async fn test_messages_flow_both_ways_in_order() {
    let (near, far) = MemoryChannel::pair("test");

    near.send(json!("first")).await.unwrap();
    near.send(json!("second")).await.unwrap();
    far.send(json!({"reply": 1})).await.unwrap();

    assert_eq!(far.receive().await.unwrap(), Some(json!("first")));
    assert_eq!(far.receive().await.unwrap(), Some(json!("second")));
    assert_eq!(near.receive().await.unwrap(), Some(json!({"reply": 1})));
}

#[tokio::test]
async fn test_dropped_peer_ends_stream() {
    let (near, far) = MemoryChannel::pair("test");
    far.send(json!("last words")).await.unwrap();
    drop(far);

    assert_eq!(near.receive().await.unwrap(), Some(json!("last words")));
    assert_eq!(near.receive().await.unwrap(), None);
    assert!(near.is_closed());
    assert_eq!(near.send(json!("hello")).await, Err(DispatchError::ChannelClosed));
}

#[tokio::test]
async fn test_close_ends_both_directions() {
    let (near, far) = MemoryChannel::pair("test");
    assert!(!far.is_closed());

    near.close();

    assert_eq!(far.receive().await.unwrap(), None);
    assert_eq!(far.send(json!("hello")).await, Err(DispatchError::ChannelClosed));
    assert_eq!(near.send(json!("hello")).await, Err(DispatchError::ChannelClosed));
    assert!(far.is_closed());
}

#[tokio::test]
async fn test_close_wakes_pending_receive() {
    let (near, far) = MemoryChannel::pair("test");
    let near = Arc::new(near);

    let pending = {
        let near = Arc::clone(&near);
        tokio::spawn(async move { near.receive().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    // 接收锁被占用时关闭也不会阻塞
    near.close();
    let received = tokio::time::timeout(Duration::from_secs(1), pending)
        .await
        .expect("pending receive should end after close")
        .unwrap();
    assert_eq!(received.unwrap(), None);

    assert_eq!(far.send(json!("late")).await, Err(DispatchError::ChannelClosed));
    assert_eq!(near.receive().await.unwrap(), None);
}

#[tokio::test]
async fn test_endpoint_names() {
    let (near, far) = MemoryChannel::pair("kitchen");
    assert_eq!(near.name(), "kitchen/near");
    assert_eq!(far.name(), "kitchen/far");
}
