use serde::{Deserialize, Serialize};

/// 负载持平时的决胜规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// 取登记顺序中最先出现的员工
    #[default]
    FirstRegistered,
    /// 取专长最少的员工，仍持平时按登记顺序
    FewestSpecialities,
}

/// 员工下岗后负载计数的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadLifecycle {
    /// 保留计数，同一员工重新上岗时沿用原有负载
    #[default]
    Preserve,
    /// 重新上岗时负载清零
    ResetOnRejoin,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub load_lifecycle: LoadLifecycle,
}
