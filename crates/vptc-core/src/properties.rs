//! 视觉属性：颜色与线型

use serde::{Deserialize, Serialize};

/// AutoCAD 颜色索引（ACI）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    pub const RED: Color = Color(1);
    pub const YELLOW: Color = Color(2);
    pub const GREEN: Color = Color(3);
    pub const CYAN: Color = Color(4);
    pub const BLUE: Color = Color(5);
    pub const MAGENTA: Color = Color(6);
    pub const WHITE: Color = Color(7);

    pub fn index(&self) -> u8 {
        self.0
    }

    /// 标准色板中前七个索引对应的 RGB，其余按白色处理
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self.0 {
            1 => (255, 0, 0),
            2 => (255, 255, 0),
            3 => (0, 255, 0),
            4 => (0, 255, 255),
            5 => (0, 0, 255),
            6 => (255, 0, 255),
            _ => (255, 255, 255),
        }
    }

    /// `#rrggbb` 形式
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// 线型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    Continuous,
    Dashed,
    Center,
}

impl LineType {
    pub const ALL: [LineType; 3] = [LineType::Continuous, LineType::Dashed, LineType::Center];

    /// DXF LTYPE 表中的名称
    pub fn dxf_name(&self) -> &'static str {
        match self {
            LineType::Continuous => "CONTINUOUS",
            LineType::Dashed => "DASHED",
            LineType::Center => "CENTER",
        }
    }

    pub fn from_dxf_name(name: &str) -> Option<LineType> {
        LineType::ALL
            .into_iter()
            .find(|lt| lt.dxf_name().eq_ignore_ascii_case(name))
    }

    pub fn description(&self) -> &'static str {
        match self {
            LineType::Continuous => "Solid line",
            LineType::Dashed => "Dashed __ __ __ __ __ __ __ __",
            LineType::Center => "Center ____ _ ____ _ ____ _ ____",
        }
    }

    /// 虚线图案（正值为实线段，负值为间隔，单位毫米）
    pub fn dash_pattern(&self) -> &'static [f64] {
        match self {
            LineType::Continuous => &[],
            LineType::Dashed => &[12.7, -6.35],
            LineType::Center => &[31.75, -6.35, 6.35, -6.35],
        }
    }

    /// 图案总长
    pub fn pattern_length(&self) -> f64 {
        self.dash_pattern().iter().map(|d| d.abs()).sum()
    }
}

/// 图元的呈现属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub color: Color,
    pub line_type: LineType,
}

impl Properties {
    pub const fn new(color: Color, line_type: LineType) -> Self {
        Self { color, line_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_type_names() {
        for lt in LineType::ALL {
            assert_eq!(LineType::from_dxf_name(lt.dxf_name()), Some(lt));
        }
        assert_eq!(LineType::from_dxf_name("dashed"), Some(LineType::Dashed));
        assert_eq!(LineType::from_dxf_name("HIDDEN"), None);
    }

    #[test]
    fn test_pattern_length() {
        assert_eq!(LineType::Continuous.pattern_length(), 0.0);
        assert!((LineType::Center.pattern_length() - 50.8).abs() < 1e-9);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::RED.to_hex(), "#ff0000");
        assert_eq!(Color::GREEN.to_hex(), "#00ff00");
        assert_eq!(Color::BLUE.to_hex(), "#0000ff");
    }
}
