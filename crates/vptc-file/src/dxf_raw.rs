//! DXF 原始文本解析器
//!
//! 不依赖完整的 DXF 对象模型，直接按组码读取文本，用于快速统计文件里
//! ENTITIES 段中各图层的实体数量。
//!
//! # 组码 (Group Code)
//!
//! 每个数据项由两行组成：
//! - 第一行：组码（数字）
//! - 第二行：值
//!
//! 用到的组码：
//! - 0: 实体类型 / 段标记
//! - 2: 段名
//! - 8: 图层名

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::FileError;

/// DXF 组码-值对
#[derive(Debug, Clone)]
pub struct DxfPair {
    pub code: i32,
    pub value: String,
}

impl DxfPair {
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self { code, value: value.into() }
    }

    fn is(&self, code: i32, value: &str) -> bool {
        self.code == code && self.value.trim() == value
    }
}

/// 按 (实体类型, 图层) 统计的实体数量
pub type EntityCensus = BTreeMap<(String, String), usize>;

/// DXF 原始解析器
pub struct DxfRawParser {
    pairs: Vec<DxfPair>,
    position: usize,
}

impl DxfRawParser {
    /// 从文件加载
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::parse(reader)
    }

    /// 从文本解析
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, FileError> {
        let mut pairs = Vec::new();
        let mut lines = reader.lines();

        loop {
            // 读取组码
            let code_line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(FileError::Io(e)),
                None => break,
            };

            // 读取值
            let value_line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(FileError::Io(e)),
                None => break,
            };

            let code: i32 = code_line.trim().parse().map_err(|_| {
                FileError::InvalidFormat(format!("Invalid group code: {}", code_line))
            })?;

            pairs.push(DxfPair::new(code, value_line.trim_end()));

            // 检查是否到达文件末尾
            if code == 0 && pairs.last().map(|p| p.value.trim()) == Some("EOF") {
                break;
            }
        }

        Ok(Self { pairs, position: 0 })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 获取当前对
    pub fn current(&self) -> Option<&DxfPair> {
        self.pairs.get(self.position)
    }

    /// 前进一步
    pub fn advance(&mut self) -> Option<&DxfPair> {
        if self.position < self.pairs.len() {
            let pair = &self.pairs[self.position];
            self.position += 1;
            Some(pair)
        } else {
            None
        }
    }

    /// 回到开头
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// 跳到下一个指定组码
    pub fn skip_to(&mut self, code: i32, value: Option<&str>) -> bool {
        while let Some(pair) = self.advance() {
            if pair.code == code {
                match value {
                    Some(v) if pair.value.trim() != v => continue,
                    _ => return true,
                }
            }
        }
        false
    }

    /// 读取直到遇到组码 0
    pub fn read_until_zero(&mut self) -> Vec<DxfPair> {
        let mut result = Vec::new();
        while let Some(pair) = self.current() {
            if pair.code == 0 {
                break;
            }
            result.push(pair.clone());
            self.advance();
        }
        result
    }

    /// 定位到指定段的第一个实体，找不到时返回 false
    fn seek_section(&mut self, name: &str) -> bool {
        self.rewind();
        while self.skip_to(0, Some("SECTION")) {
            if self.current().is_some_and(|p| p.is(2, name)) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// 统计 ENTITIES 段中每个 (实体类型, 图层) 的数量
    pub fn entity_census(&mut self) -> Result<EntityCensus, FileError> {
        if !self.seek_section("ENTITIES") {
            return Err(FileError::InvalidFormat("No ENTITIES section".to_string()));
        }

        let mut census = EntityCensus::new();
        loop {
            // 跳过段头与实体之间的非 0 组码
            self.read_until_zero();

            let Some(pair) = self.advance() else {
                return Err(FileError::InvalidFormat("Unterminated ENTITIES section".to_string()));
            };
            let kind = pair.value.trim().to_string();
            if kind == "ENDSEC" {
                break;
            }

            let layer = self
                .read_until_zero()
                .into_iter()
                .find(|p| p.code == 8)
                .map(|p| p.value.trim().to_string())
                .unwrap_or_else(|| "0".to_string());

            *census.entry((kind, layer)).or_insert(0) += 1;
        }

        Ok(census)
    }
}

/// 把统计结果按图层汇总
pub fn count_by_layer(census: &EntityCensus) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for ((_, layer), n) in census {
        *counts.entry(layer.clone()).or_insert(0) += n;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "  0\nSECTION\n  2\nHEADER\n  9\n$ACADVER\n  1\nAC1015\n  0\nENDSEC\n  0\nSECTION\n  2\nENTITIES\n  0\nCIRCLE\n  5\n100\n  8\nSEP\n 40\n35.12\n  0\nLWPOLYLINE\n  8\nBASE\n 90\n2\n  0\nCIRCLE\n  8\nSEP\n 40\n32.48\n  0\nENDSEC\n  0\nEOF\n";

    #[test]
    fn test_entity_census() {
        let mut parser = DxfRawParser::parse(SAMPLE.as_bytes()).unwrap();
        let census = parser.entity_census().unwrap();

        assert_eq!(census.get(&("CIRCLE".to_string(), "SEP".to_string())), Some(&2));
        assert_eq!(census.get(&("LWPOLYLINE".to_string(), "BASE".to_string())), Some(&1));

        let by_layer = count_by_layer(&census);
        assert_eq!(by_layer.get("SEP"), Some(&2));
        assert_eq!(by_layer.get("BASE"), Some(&1));
    }

    #[test]
    fn test_crlf_and_missing_section() {
        let text = "  0\r\nSECTION\r\n  2\r\nHEADER\r\n  0\r\nENDSEC\r\n  0\r\nEOF\r\n";
        let mut parser = DxfRawParser::parse(text.as_bytes()).unwrap();
        assert_eq!(parser.len(), 4);
        assert!(matches!(parser.entity_census(), Err(FileError::InvalidFormat(_))));
    }

    #[test]
    fn test_invalid_group_code() {
        let result = DxfRawParser::parse("abc\nSECTION\n".as_bytes());
        assert!(matches!(result, Err(FileError::InvalidFormat(_))));
    }
}
