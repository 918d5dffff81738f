//! 版本描述符与版本比较
//!
//! 服务端发布 `version.json`，管理端定期拉取并与本地缓存的版本号比较，
//! 判断是否提示更新。

use serde::{Deserialize, Serialize};

/// `version.json` 的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// 点分三段版本号，如 "2.1.0"
    pub version: String,
    /// 变更列表 (可选)
    #[serde(default)]
    pub changes: Vec<String>,
}

impl VersionDescriptor {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            changes: Vec::new(),
        }
    }
}

/// 按段解析版本号，缺失或非数字的段按 0 处理
fn parse_components(version: &str) -> [u64; 3] {
    let mut out = [0u64; 3];
    for (i, part) in version.trim().split('.').take(3).enumerate() {
        out[i] = part.trim().parse().unwrap_or(0);
    }
    out
}

/// 判断 `candidate` 是否比 `current` 更新
///
/// 逐段数值比较：major、minor、patch，从左到右。
pub fn is_newer_version(candidate: &str, current: &str) -> bool {
    parse_components(candidate) > parse_components(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_bump_is_newer() {
        assert!(is_newer_version("2.1.1", "2.1.0"));
    }

    #[test]
    fn equal_versions_are_not_newer() {
        assert!(!is_newer_version("2.1.0", "2.1.0"));
    }

    #[test]
    fn minor_outranks_patch() {
        assert!(!is_newer_version("2.0.9", "2.1.0"));
        assert!(is_newer_version("2.2.0", "2.1.9"));
    }

    #[test]
    fn comparison_is_numeric_not_lexicographic() {
        assert!(is_newer_version("2.10.0", "2.9.0"));
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert!(is_newer_version("2.1", "2.0.5"));
        assert!(!is_newer_version("2", "2.0.0"));
    }

    #[test]
    fn garbage_components_compare_as_zero() {
        assert!(!is_newer_version("x.y.z", "0.0.0"));
        assert!(is_newer_version("1.0.0", "x.y.z"));
    }

    #[test]
    fn descriptor_changes_default_to_empty() {
        let desc: VersionDescriptor = serde_json::from_str(r#"{"version":"1.2.3"}"#).unwrap();
        assert_eq!(desc.version, "1.2.3");
        assert!(desc.changes.is_empty());
    }
}
