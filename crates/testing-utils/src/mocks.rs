//! Mock implementations of the channel trait

use async_trait::async_trait;
use mockall::mock;
use roster_core::{Channel, DispatchResult, Payload};

mock! {
    pub Channel {}

    #[async_trait]
    impl Channel for Channel {
        async fn receive(&self) -> DispatchResult<Option<Payload>>;
        async fn send(&self, message: Payload) -> DispatchResult<()>;
    }
}
