use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use roster_core::{
    Channel, DispatchError, DispatchEvent, DispatchResult, DispatcherConfig, Payload,
    SelectionStrategy, Speciality, StaffId, StaffLoad,
};

use crate::state::DutyRoster;
use crate::strategies::{strategy_for, LeastLoadedStrategy};

/// 订单调度器
///
/// 所有事件都通过 [`Dispatcher::handle`] 进入。登记表与负载计数共用一把锁，
/// 选择员工和预占负载在同一个临界区内完成；等待通道消息时不持有锁，
/// 因此多个订单可以并发中继。
pub struct Dispatcher {
    roster: Mutex<DutyRoster>,
    strategy: Arc<dyn SelectionStrategy>,
    metrics_enabled: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            roster: Mutex::new(DutyRoster::default()),
            strategy: Arc::new(LeastLoadedStrategy::new()),
            metrics_enabled: true,
        }
    }

    pub fn with_config(config: &DispatcherConfig) -> Self {
        info!(
            "创建调度器，决胜规则: {:?}，负载计数: {:?}",
            config.tie_break, config.load_lifecycle
        );
        Self {
            roster: Mutex::new(DutyRoster::new(config.load_lifecycle)),
            strategy: strategy_for(config.tie_break),
            metrics_enabled: true,
        }
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// 处理一个事件
    ///
    /// 上岗与下岗事件同步完成；订单事件会在等待提交方内容和员工结果时挂起。
    /// 任何失败都原样返回给调用方，不做重试。
    pub async fn handle(&self, event: DispatchEvent) -> DispatchResult<()> {
        if let Err(e) = event.validate() {
            warn!("拒绝无效的事件 {}: {e}", event.event_type());
            self.record_failure(&e);
            return Err(e);
        }

        let result = match event {
            DispatchEvent::StaffOnDuty {
                id,
                specialities,
                channel,
            } => {
                self.staff_on_duty(id, specialities, channel);
                Ok(())
            }
            DispatchEvent::StaffOffDuty { id } => self.staff_off_duty(&id),
            DispatchEvent::Order {
                speciality,
                channel,
            } => {
                let span = info_span!(
                    "order",
                    order_id = %Uuid::new_v4(),
                    speciality = %speciality
                );
                self.relay_order(speciality, channel).instrument(span).await
            }
        };

        if let Err(e) = &result {
            self.record_failure(e);
        }
        result
    }

    /// 解析传输层的JSON事件描述后处理
    pub async fn handle_scope(
        &self,
        scope: &Value,
        channel: Option<Arc<dyn Channel>>,
    ) -> DispatchResult<()> {
        match DispatchEvent::from_scope(scope, channel) {
            Ok(event) => self.handle(event).await,
            Err(e) => {
                warn!("拒绝无法识别的事件: {e}");
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// 为订单选择员工，不修改任何状态
    pub fn select_worker(&self, speciality: &Speciality) -> DispatchResult<StaffId> {
        let roster = self.roster.lock();
        self.select_from(&roster, speciality)
    }

    pub fn current_load(&self, id: &StaffId) -> u64 {
        self.roster.lock().current_load(id)
    }

    pub fn is_on_duty(&self, id: &StaffId) -> bool {
        self.roster.lock().is_on_duty(id)
    }

    /// 按上岗顺序返回在岗员工及其负载
    pub fn roster(&self) -> Vec<StaffLoad> {
        self.roster.lock().snapshot()
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    fn staff_on_duty(
        &self,
        id: StaffId,
        specialities: BTreeSet<Speciality>,
        channel: Arc<dyn Channel>,
    ) {
        let on_duty = {
            let mut roster = self.roster.lock();
            if roster.is_on_duty(&id) {
                debug!("员工 {} 重复上岗，覆盖原有登记", id);
            }
            info!("员工上岗: {} (专长: {:?})", id, specialities);
            roster.add_worker(id, specialities, channel);
            roster.len()
        };
        self.record_on_duty(on_duty);
    }

    fn staff_off_duty(&self, id: &StaffId) -> DispatchResult<()> {
        let on_duty = {
            let mut roster = self.roster.lock();
            roster.remove_worker(id)?;
            roster.len()
        };
        info!("员工下岗: {}", id);
        self.record_on_duty(on_duty);
        Ok(())
    }

    fn select_from(&self, roster: &DutyRoster, speciality: &Speciality) -> DispatchResult<StaffId> {
        self.strategy
            .select_worker(speciality, &roster.candidates())
            .ok_or_else(|| {
                debug!("没有支持专长 {} 的在岗员工", speciality);
                DispatchError::NoAvailableWorker {
                    speciality: speciality.clone(),
                }
            })
    }

    /// 选择员工并立即预占一次负载
    fn reserve_worker(&self, speciality: &Speciality) -> DispatchResult<(StaffId, Arc<dyn Channel>)> {
        let mut roster = self.roster.lock();
        let id = self.select_from(&roster, speciality)?;
        let channel = roster
            .get(&id)
            .map(|entry| Arc::clone(&entry.channel))
            .ok_or_else(|| DispatchError::NotOnDuty { id: id.clone() })?;
        roster.increment_load(&id);
        debug!("员工 {} 预占订单，当前负载: {}", id, roster.current_load(&id));
        Ok((id, channel))
    }

    async fn relay_order(
        &self,
        speciality: Speciality,
        channel: Arc<dyn Channel>,
    ) -> DispatchResult<()> {
        let (worker_id, worker_channel) = self.reserve_worker(&speciality)?;

        // 预占的负载不回滚
        let body = next_message(channel.receive().await).map_err(|reason| {
            warn!("订单内容未送达，员工 {} 的预占负载保留: {}", worker_id, reason);
            DispatchError::OrderAborted {
                speciality: speciality.clone(),
                reason,
            }
        })?;

        worker_channel
            .send(body)
            .await
            .map_err(|e| worker_aborted(&worker_id, e.to_string()))?;
        debug!("订单已转交员工 {}", worker_id);

        let result = next_message(worker_channel.receive().await)
            .map_err(|reason| worker_aborted(&worker_id, reason))?;

        channel.send(result).await.map_err(|e| {
            warn!("提交方已离开，结果无法送达: {e}");
            DispatchError::OrderAborted {
                speciality: speciality.clone(),
                reason: e.to_string(),
            }
        })?;

        info!("订单完成，由员工 {} 处理", worker_id);
        if self.metrics_enabled {
            metrics::counter!("roster_orders_dispatched_total", "speciality" => speciality.to_string())
                .increment(1);
        }
        Ok(())
    }

    fn record_failure(&self, error: &DispatchError) {
        if self.metrics_enabled {
            metrics::counter!("roster_events_failed_total", "reason" => error.kind()).increment(1);
        }
    }

    fn record_on_duty(&self, count: usize) {
        if self.metrics_enabled {
            metrics::gauge!("roster_staff_on_duty").set(count as f64);
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn next_message(received: DispatchResult<Option<Payload>>) -> Result<Payload, String> {
    match received {
        Ok(Some(message)) => Ok(message),
        Ok(None) => Err("通道已结束".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn worker_aborted(id: &StaffId, reason: String) -> DispatchError {
    warn!("员工 {} 未返回结果: {}", id, reason);
    DispatchError::WorkerAborted {
        id: id.clone(),
        reason,
    }
}
