use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 员工标识，在岗期间唯一且稳定
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StaffId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StaffId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// 传输层可能用数字作为员工标识，这里统一成字符串
impl<'de> Deserialize<'de> for StaffId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => StaffId(text),
            RawId::Number(number) => StaffId(number.to_string()),
        })
    }
}

/// 专长标签，调度器只做字符串匹配
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speciality(String);

impl Speciality {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Speciality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Speciality {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Speciality {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// 从字符串列表构造专长集合
pub fn specialities<I, S>(tags: I) -> BTreeSet<Speciality>
where
    I: IntoIterator<Item = S>,
    S: Into<Speciality>,
{
    tags.into_iter().map(Into::into).collect()
}

/// 在岗员工及其负载的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffLoad {
    pub id: StaffId,
    pub specialities: Vec<Speciality>,
    pub load: u64,
    pub on_duty_since: DateTime<Utc>,
}

impl StaffLoad {
    /// 检查员工是否具备指定专长
    pub fn can_handle(&self, speciality: &Speciality) -> bool {
        self.specialities.contains(speciality)
    }
}
