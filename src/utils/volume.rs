// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::warn;

/// 将供应商返回的搜索量字符串映射为数值
///
/// 供应商以 `"1.2k"`、`"<500"`、`">10k"`、`"3M"` 等形式返回搜索量。
/// 规则：
/// - 去掉比较运算符（`<`、`>`）后解析数值，`k`/`K` 乘以 1000，`M` 乘以 1,000,000
/// - 前导 `<` 保留解析值（上界即取值），前导 `>` 加 1（表示"至少 value+1"）
/// - 无法解析的字符串映射为 0，并记录数据质量告警，绝不中断流程
pub fn map_volume(volume_str: &str) -> u64 {
    let trimmed = volume_str.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let clean: String = trimmed.chars().filter(|c| *c != '<' && *c != '>').collect();
    let clean = clean.trim();

    let parsed = if let Some(number) = clean.strip_suffix(['k', 'K']) {
        number
            .trim()
            .parse::<f64>()
            .ok()
            .map(|n| (n * 1_000.0).floor() as u64)
    } else if let Some(number) = clean.strip_suffix('M') {
        number
            .trim()
            .parse::<f64>()
            .ok()
            .map(|n| (n * 1_000_000.0).floor() as u64)
    } else {
        clean.parse::<f64>().ok().map(|n| n.floor() as u64)
    };

    let value = match parsed {
        Some(v) => v,
        None => {
            // 数据质量事件：该格式尚未被映射器覆盖
            warn!(volume = %volume_str, "Unparsable search volume string, defaulting to 0");
            return 0;
        }
    };

    if trimmed.contains('<') {
        value
    } else if trimmed.contains('>') {
        value + 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(map_volume("250"), 250);
        assert_eq!(map_volume("0"), 0);
    }

    #[test]
    fn test_k_suffix() {
        assert_eq!(map_volume("1.2k"), 1200);
        assert_eq!(map_volume("3K"), 3000);
    }

    #[test]
    fn test_m_suffix() {
        assert_eq!(map_volume("2M"), 2_000_000);
        assert_eq!(map_volume("1.5M"), 1_500_000);
    }

    #[test]
    fn test_less_than_keeps_value() {
        assert_eq!(map_volume("<500"), 500);
        assert_eq!(map_volume("<1k"), 1000);
    }

    #[test]
    fn test_greater_than_adds_one() {
        assert_eq!(map_volume(">10k"), 10001);
        assert_eq!(map_volume(">100"), 101);
    }

    #[test]
    fn test_garbage_maps_to_zero() {
        assert_eq!(map_volume("garbage"), 0);
        assert_eq!(map_volume(""), 0);
        assert_eq!(map_volume("N/A"), 0);
    }
}
