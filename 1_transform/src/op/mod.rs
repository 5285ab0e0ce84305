use crate::TensorMeta;
use digit_layout::DigitLayout;
use dtype::{DataType, UnsupportedLayout};

mod compare;
mod pairwise;

pub use compare::ScalarCompare;
pub use pairwise::{PairwiseTransform, broadcast};

/// 计算图层算子，只做输出类型和形状推导。
pub trait Operator: Send + Sync {
    fn name(&self) -> &'static str;

    /// 算子要求的输入个数。
    fn arity(&self) -> usize;

    /// 从输入元素类型推导输出元素类型。
    fn infer_types(&self, inputs: &[DataType]) -> Result<Vec<DataType>, OpError>;

    /// 从输入张量信息推导输出张量信息。
    fn infer(&self, inputs: &[TensorMeta]) -> Result<Vec<TensorMeta>, OpError>;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum OpError {
    #[error("operator not exist")]
    NotExist,
    #[error("{op} expects {expected} input data types, got none")]
    MissingInputs { op: &'static str, expected: usize },
    #[error("{op} expects exactly {expected} input data types, got {actual}")]
    Arity {
        op: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("data type {0} not supported")]
    DataTypeError(DigitLayout),
    #[error("shape error")]
    ShapeError,
    #[error("shape mismatch")]
    ShapeMismatch,
}

impl OpError {
    /// 输入个数与算子声明不符，属于算子定义错误。
    pub const fn is_arity(&self) -> bool {
        matches!(self, Self::MissingInputs { .. } | Self::Arity { .. })
    }
}

/// 检查输入个数并转为定长数组引用。
pub(crate) fn fixed<'a, T, const N: usize>(
    op: &'static str,
    inputs: &'a [T],
) -> Result<&'a [T; N], OpError> {
    inputs.try_into().map_err(|_| OpError::Arity {
        op,
        expected: N,
        actual: inputs.len(),
    })
}

pub(crate) fn decode(meta: &TensorMeta) -> Result<DataType, OpError> {
    DataType::try_from(meta.dt).map_err(|UnsupportedLayout(dt)| OpError::DataTypeError(dt))
}
