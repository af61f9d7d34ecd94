//! 按专长与负载分派订单的调度器
//!
//! [`Dispatcher`] 持有员工登记表与负载计数，逐个处理上岗、下岗与订单事件，
//! 并在提交方与被选中的员工之间中继订单内容和结果。

pub mod dispatcher;
pub mod state;
pub mod strategies;

#[cfg(test)]
mod strategies_test;

pub use dispatcher::*;
pub use state::*;
pub use strategies::*;
