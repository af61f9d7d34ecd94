use std::sync::Arc;

use tracing::debug;

use roster_core::{SelectionStrategy, Speciality, StaffCandidate, StaffId, TieBreak};

/// 最小负载策略，负载持平时取登记顺序中最先出现的员工
pub struct LeastLoadedStrategy;

/// 最小负载策略，负载持平时优先专长最少的员工，再按登记顺序
pub struct SpecialistFirstStrategy;

impl LeastLoadedStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LeastLoadedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for LeastLoadedStrategy {
    fn select_worker(
        &self,
        speciality: &Speciality,
        candidates: &[StaffCandidate<'_>],
    ) -> Option<StaffId> {
        // min_by_key 在并列时返回第一个元素
        let selected = candidates
            .iter()
            .filter(|candidate| candidate.can_accept(speciality))
            .min_by_key(|candidate| candidate.load)?;

        debug!(
            "最小负载策略选择员工: {} (负载: {})",
            selected.id, selected.load
        );

        Some(selected.id.clone())
    }

    fn name(&self) -> &str {
        "LeastLoaded"
    }
}

impl SpecialistFirstStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpecialistFirstStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for SpecialistFirstStrategy {
    fn select_worker(
        &self,
        speciality: &Speciality,
        candidates: &[StaffCandidate<'_>],
    ) -> Option<StaffId> {
        let selected = candidates
            .iter()
            .filter(|candidate| candidate.can_accept(speciality))
            .min_by_key(|candidate| (candidate.load, candidate.specialities.len()))?;

        debug!(
            "专长优先策略选择员工: {} (负载: {}, 专长: {:?})",
            selected.id, selected.load, selected.specialities
        );

        Some(selected.id.clone())
    }

    fn name(&self) -> &str {
        "SpecialistFirst"
    }
}

/// 按配置的决胜规则创建选择策略
pub fn strategy_for(tie_break: TieBreak) -> Arc<dyn SelectionStrategy> {
    match tie_break {
        TieBreak::FirstRegistered => Arc::new(LeastLoadedStrategy::new()),
        TieBreak::FewestSpecialities => Arc::new(SpecialistFirstStrategy::new()),
    }
}
