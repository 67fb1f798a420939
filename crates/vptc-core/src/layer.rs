//! 图层定义
//!
//! 模型中的每个图元都属于三个固定图层之一，图层决定颜色与线型：
//!
//! | 图层 | 内容 | 颜色 | 线型 |
//! |---|---|---|---|
//! | BASE | 刚轮廓形、外壁圆 | 1 | CONTINUOUS |
//! | SEP | 隔离架内外圆、构造线 | 3 | DASHED |
//! | ECC | 偏心轮圆 | 5 | CENTER |

use crate::properties::{Color, LineType, Properties};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    /// 刚轮
    Base,
    /// 隔离架
    Separator,
    /// 偏心轮
    Eccentric,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Base, Layer::Separator, Layer::Eccentric];

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Base => "BASE",
            Layer::Separator => "SEP",
            Layer::Eccentric => "ECC",
        }
    }

    pub fn from_name(name: &str) -> Option<Layer> {
        Layer::ALL.into_iter().find(|l| l.name() == name)
    }

    /// 图层的固定呈现属性
    pub fn properties(&self) -> Properties {
        match self {
            Layer::Base => Properties::new(Color::RED, LineType::Continuous),
            Layer::Separator => Properties::new(Color::GREEN, LineType::Dashed),
            Layer::Eccentric => Properties::new(Color::BLUE, LineType::Center),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_table() {
        assert_eq!(Layer::Base.properties(), Properties::new(Color(1), LineType::Continuous));
        assert_eq!(Layer::Separator.properties(), Properties::new(Color(3), LineType::Dashed));
        assert_eq!(Layer::Eccentric.properties(), Properties::new(Color(5), LineType::Center));
    }

    #[test]
    fn test_layer_names() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_name(layer.name()), Some(layer));
        }
        assert_eq!(Layer::from_name("0"), None);
    }
}
