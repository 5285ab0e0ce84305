use super::{OpError, Operator, decode, fixed};
use crate::TensorMeta;
use dtype::DataType;

/// 比较两个标量，输出一个布尔标量。输入可以是任意类型。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScalarCompare {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl ScalarCompare {
    pub const ARITY: usize = 2;

    pub const ALL: [Self; 6] = [Self::Eq, Self::Neq, Self::Lt, Self::Lte, Self::Gt, Self::Gte];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "eq_scalar",
            Self::Neq => "neq_scalar",
            Self::Lt => "lt_scalar",
            Self::Lte => "lte_scalar",
            Self::Gt => "gt_scalar",
            Self::Gte => "gte_scalar",
        }
    }

    /// 注册表中使用的别名。
    pub const fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Eq => &["Equals"],
            Self::Neq => &["NotEquals"],
            Self::Lt => &["LessThan"],
            Self::Lte => &["LessOrEquals"],
            Self::Gt => &["GreaterThan"],
            Self::Gte => &["GreaterOrEquals", "greaterOrEquals"],
        }
    }
}

impl Operator for ScalarCompare {
    fn name(&self) -> &'static str {
        ScalarCompare::name(*self)
    }

    fn arity(&self) -> usize {
        Self::ARITY
    }

    fn infer_types(&self, inputs: &[DataType]) -> Result<Vec<DataType>, OpError> {
        fixed::<_, 2>(ScalarCompare::name(*self), inputs)?;
        Ok(vec![DataType::Bool])
    }

    fn infer(&self, inputs: &[TensorMeta]) -> Result<Vec<TensorMeta>, OpError> {
        let [a, b] = fixed::<_, 2>(ScalarCompare::name(*self), inputs)?;
        for x in [a, b] {
            decode(x)?;
            if !x.is_scalar() {
                return Err(OpError::ShapeError);
            }
        }
        Ok(vec![TensorMeta::new(DataType::Bool.into(), [])])
    }
}
