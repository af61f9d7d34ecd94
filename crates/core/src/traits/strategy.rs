use std::collections::BTreeSet;

use crate::models::{Speciality, StaffId};

/// 参与选择的在岗员工视图
#[derive(Debug, Clone, Copy)]
pub struct StaffCandidate<'a> {
    pub id: &'a StaffId,
    pub specialities: &'a BTreeSet<Speciality>,
    pub load: u64,
}

impl StaffCandidate<'_> {
    /// 检查员工是否可以接受该专长的订单
    pub fn can_accept(&self, speciality: &Speciality) -> bool {
        self.specialities.contains(speciality)
    }
}

/// 员工选择策略接口
///
/// 候选列表按上岗登记顺序排列。实现必须是当前快照的纯函数：
/// 同一快照重复调用返回同一员工。
pub trait SelectionStrategy: Send + Sync {
    /// 选择处理订单的员工，没有合适员工时返回 `None`
    fn select_worker(
        &self,
        speciality: &Speciality,
        candidates: &[StaffCandidate<'_>],
    ) -> Option<StaffId>;

    /// 获取策略名称
    fn name(&self) -> &str;
}
