use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use roster_core::{
    Channel, DispatchError, DispatchResult, LoadLifecycle, Speciality, StaffCandidate, StaffId,
    StaffLoad,
};

/// 在岗员工登记项
#[derive(Clone)]
pub struct WorkerEntry {
    pub id: StaffId,
    pub specialities: BTreeSet<Speciality>,
    pub channel: Arc<dyn Channel>,
    pub on_duty_since: DateTime<Utc>,
}

impl std::fmt::Debug for WorkerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerEntry")
            .field("id", &self.id)
            .field("specialities", &self.specialities)
            .field("on_duty_since", &self.on_duty_since)
            .finish_non_exhaustive()
    }
}

/// 员工登记表与负载计数
///
/// 登记表保持上岗顺序，同一员工重复上岗时原位覆盖。负载计数独立于登记表，
/// 下岗不会清除计数。本类型不做同步，由 [`crate::Dispatcher`] 统一加锁。
#[derive(Debug, Default)]
pub struct DutyRoster {
    staff: IndexMap<StaffId, WorkerEntry>,
    loads: HashMap<StaffId, u64>,
    lifecycle: LoadLifecycle,
}

impl DutyRoster {
    pub fn new(lifecycle: LoadLifecycle) -> Self {
        Self {
            staff: IndexMap::new(),
            loads: HashMap::new(),
            lifecycle,
        }
    }

    /// 登记或覆盖员工
    pub fn add_worker(
        &mut self,
        id: StaffId,
        specialities: BTreeSet<Speciality>,
        channel: Arc<dyn Channel>,
    ) {
        let rejoining = !self.staff.contains_key(&id);
        if rejoining && self.lifecycle == LoadLifecycle::ResetOnRejoin {
            self.loads.remove(&id);
        }

        let entry = WorkerEntry {
            id: id.clone(),
            specialities,
            channel,
            on_duty_since: Utc::now(),
        };
        self.staff.insert(id, entry);
    }

    /// 注销员工，员工不在岗时返回 [`DispatchError::NotOnDuty`]
    pub fn remove_worker(&mut self, id: &StaffId) -> DispatchResult<WorkerEntry> {
        self.staff
            .shift_remove(id)
            .ok_or_else(|| DispatchError::NotOnDuty { id: id.clone() })
    }

    pub fn increment_load(&mut self, id: &StaffId) {
        *self.loads.entry(id.clone()).or_insert(0) += 1;
    }

    pub fn current_load(&self, id: &StaffId) -> u64 {
        self.loads.get(id).copied().unwrap_or(0)
    }

    pub fn get(&self, id: &StaffId) -> Option<&WorkerEntry> {
        self.staff.get(id)
    }

    pub fn is_on_duty(&self, id: &StaffId) -> bool {
        self.staff.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }

    /// 按上岗顺序列出选择候选
    pub fn candidates(&self) -> Vec<StaffCandidate<'_>> {
        self.staff
            .values()
            .map(|entry| StaffCandidate {
                id: &entry.id,
                specialities: &entry.specialities,
                load: self.current_load(&entry.id),
            })
            .collect()
    }

    /// 在岗员工及负载快照
    pub fn snapshot(&self) -> Vec<StaffLoad> {
        self.staff
            .values()
            .map(|entry| StaffLoad {
                id: entry.id.clone(),
                specialities: entry.specialities.iter().cloned().collect(),
                load: self.current_load(&entry.id),
                on_duty_since: entry.on_duty_since,
            })
            .collect()
    }
}
