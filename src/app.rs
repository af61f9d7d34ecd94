use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use roster_core::{AppConfig, Channel, DispatchEvent, Payload, Speciality, StaffConfig};
use roster_dispatcher::Dispatcher;
use roster_infrastructure::MemoryChannel;

/// 演示程序：用内存通道模拟员工与下单方
pub struct Application {
    config: AppConfig,
    dispatcher: Arc<Dispatcher>,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let dispatcher = Dispatcher::with_config(&config.dispatcher)
            .with_metrics(config.observability.metrics_enabled);

        Self {
            config,
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// 让配置中的员工全部上岗，每位员工由一个后台任务模拟
    pub async fn open_kitchen(&self) -> Result<Vec<JoinHandle<()>>> {
        let mut workers = Vec::with_capacity(self.config.staff.len());

        for staff in &self.config.staff {
            let (dispatcher_side, worker_side) = MemoryChannel::pair(staff.id.as_str());
            let event = DispatchEvent::staff_on_duty(
                staff.id.as_str(),
                staff.speciality.iter().map(String::as_str),
                Arc::new(dispatcher_side),
            );
            self.dispatcher
                .handle(event)
                .await
                .with_context(|| format!("员工 {} 上岗失败", staff.id))?;

            workers.push(spawn_kitchen_worker(staff.clone(), worker_side));
        }

        info!("{} 名员工已上岗", workers.len());
        Ok(workers)
    }

    /// 逐行读取订单并并发中继，输入结束后等待所有在途订单完成
    ///
    /// 每行格式为 `<专长> <订单内容>`，内容可以是JSON，否则按字符串处理。
    pub async fn run<R>(&self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut in_flight = Vec::new();

        while let Some(line) = lines.next_line().await.context("读取订单输入失败")? {
            let Some((speciality, body)) = parse_order_line(&line) else {
                if !line.trim().is_empty() {
                    warn!("忽略无法解析的订单: {line}");
                }
                continue;
            };

            let dispatcher = Arc::clone(&self.dispatcher);
            in_flight.push(tokio::spawn(async move {
                match submit_order(&dispatcher, speciality.clone(), body).await {
                    Ok(Value::String(text)) => println!("[{speciality}] {text}"),
                    Ok(result) => println!("[{speciality}] {result}"),
                    Err(e) => warn!("订单失败: {e:#}"),
                }
            }));
        }

        debug!("订单输入结束，等待 {} 个在途订单", in_flight.len());
        join_all(in_flight).await;

        for staff in self.dispatcher.roster() {
            info!("员工 {} 今日接单 {} 份", staff.id, staff.load);
        }
        Ok(())
    }
}

/// 以下单方身份提交订单并等待结果
pub async fn submit_order(
    dispatcher: &Dispatcher,
    speciality: Speciality,
    body: Payload,
) -> Result<Payload> {
    let (dispatcher_side, submitter_side) = MemoryChannel::pair(format!("order-{speciality}"));
    submitter_side
        .send(body)
        .await
        .context("发送订单内容失败")?;

    dispatcher
        .handle(DispatchEvent::order(speciality, Arc::new(dispatcher_side)))
        .await?;

    submitter_side
        .receive()
        .await?
        .context("调度器未返回订单结果")
}

/// 解析 `<专长> <订单内容>` 格式的输入行
pub fn parse_order_line(line: &str) -> Option<(Speciality, Payload)> {
    let (speciality, body) = line.trim().split_once(char::is_whitespace)?;
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let body = serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()));
    Some((Speciality::from(speciality), body))
}

fn spawn_kitchen_worker(staff: StaffConfig, worker_side: MemoryChannel) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(Some(order)) = worker_side.receive().await {
            tokio::time::sleep(Duration::from_millis(staff.prep_millis)).await;

            let dish = match &order {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            let result = Value::String(format!("{dish} ready ({})", staff.id));
            if worker_side.send(result).await.is_err() {
                break;
            }
        }
        debug!("员工 {} 的模拟任务结束", staff.id);
    })
}
