use serde::{Deserialize, Serialize};

/// 演示程序启动时上岗的模拟员工
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffConfig {
    pub id: String,
    pub speciality: Vec<String>,
    #[serde(default = "default_prep_millis")]
    pub prep_millis: u64,
}

fn default_prep_millis() -> u64 {
    200
}

impl StaffConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.id.is_empty() {
            return Err(anyhow::anyhow!("员工ID不能为空"));
        }

        if self.speciality.is_empty() {
            return Err(anyhow::anyhow!("员工 {} 的专长不能为空", self.id));
        }

        if self.speciality.iter().any(|tag| tag.is_empty()) {
            return Err(anyhow::anyhow!("员工 {} 含有空的专长标签", self.id));
        }

        Ok(())
    }
}
