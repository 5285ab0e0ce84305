//! 张量元素类型标签及二元类型提升规则。

mod promote;

use digit_layout::{DigitLayout, types};
use std::{fmt, str::FromStr};

pub use promote::pick_pairwise;

/// 张量元素的数值表示。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DataType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    BF16,
    F32,
    F64,
}

impl DataType {
    pub const ALL: [Self; 13] = [
        Self::Bool,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F16,
        Self::BF16,
        Self::F32,
        Self::F64,
    ];

    pub const fn nbytes(self) -> usize {
        match self {
            Self::Bool | Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 | Self::F16 | Self::BF16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }

    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::BF16 | Self::F32 | Self::F64)
    }

    #[inline]
    pub const fn is_int(self) -> bool {
        !self.is_bool() && !self.is_float()
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64) || self.is_float()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown data type name \"{0}\"")]
pub struct UnknownName(pub String);

impl FromStr for DataType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| UnknownName(s.into()))
    }
}

impl From<DataType> for DigitLayout {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Bool => types::Bool,
            DataType::I8 => types::I8,
            DataType::I16 => types::I16,
            DataType::I32 => types::I32,
            DataType::I64 => types::I64,
            DataType::U8 => types::U8,
            DataType::U16 => types::U16,
            DataType::U32 => types::U32,
            DataType::U64 => types::U64,
            DataType::F16 => types::F16,
            DataType::BF16 => types::BF16,
            DataType::F32 => types::F32,
            DataType::F64 => types::F64,
        }
    }
}

/// 无法参与类型提升的存储布局，例如量化类型。
#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("data type {0} has no promotion rank")]
pub struct UnsupportedLayout(pub DigitLayout);

impl TryFrom<DigitLayout> for DataType {
    type Error = UnsupportedLayout;

    fn try_from(value: DigitLayout) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|&ty| DigitLayout::from(ty) == value)
            .ok_or(UnsupportedLayout(value))
    }
}
