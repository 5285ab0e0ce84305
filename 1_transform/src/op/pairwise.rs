use super::{OpError, Operator, decode, fixed};
use crate::TensorMeta;
use dtype::{DataType, pick_pairwise};
use itertools::{EitherOrBoth::*, Itertools};

/// 双输入单输出、输出类型由二元类型提升决定的变换算子。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PairwiseTransform {
    Add,
    Sub,
    Mul,
    Div,
    RSub,
    RDiv,
    FloorDiv,
    FloorMod,
    TruncateDiv,
    SquaredDifference,
    Maximum,
    Minimum,
    Pow,
    Atan2,
}

impl PairwiseTransform {
    pub const ARITY: usize = 2;

    pub const ALL: [Self; 14] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::RSub,
        Self::RDiv,
        Self::FloorDiv,
        Self::FloorMod,
        Self::TruncateDiv,
        Self::SquaredDifference,
        Self::Maximum,
        Self::Minimum,
        Self::Pow,
        Self::Atan2,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "subtract",
            Self::Mul => "multiply",
            Self::Div => "divide",
            Self::RSub => "reversesubtract",
            Self::RDiv => "reversedivide",
            Self::FloorDiv => "floordiv",
            Self::FloorMod => "floormod",
            Self::TruncateDiv => "truncatediv",
            Self::SquaredDifference => "squaredsubtract",
            Self::Maximum => "maximum",
            Self::Minimum => "minimum",
            Self::Pow => "Pow",
            Self::Atan2 => "tf_atan2",
        }
    }

    /// 推导输出类型。`None` 表示调用方没有提供输入类型列表。
    ///
    /// ```rust
    /// # use transform::{DataType, PairwiseTransform};
    /// let ans = PairwiseTransform::Add.infer_output_types(Some(&[DataType::F32, DataType::F64][..]));
    /// assert_eq!(ans.unwrap(), [DataType::F64]);
    /// ```
    pub fn infer_output_types(
        self,
        input_types: Option<&[DataType]>,
    ) -> Result<Vec<DataType>, OpError> {
        let Some(input_types) = input_types else {
            return Err(OpError::MissingInputs {
                op: self.name(),
                expected: Self::ARITY,
            });
        };
        let &[a, b] = fixed::<_, 2>(self.name(), input_types)?;
        Ok(vec![pick_pairwise(a, b)])
    }
}

impl Operator for PairwiseTransform {
    fn name(&self) -> &'static str {
        PairwiseTransform::name(*self)
    }

    fn arity(&self) -> usize {
        Self::ARITY
    }

    fn infer_types(&self, inputs: &[DataType]) -> Result<Vec<DataType>, OpError> {
        self.infer_output_types(Some(inputs))
    }

    fn infer(&self, inputs: &[TensorMeta]) -> Result<Vec<TensorMeta>, OpError> {
        let [a, b] = fixed::<_, 2>(PairwiseTransform::name(*self), inputs)?;
        let dt = pick_pairwise(decode(a)?, decode(b)?);
        let shape = broadcast(a.shape(), b.shape()).ok_or(OpError::ShapeMismatch)?;
        Ok(vec![TensorMeta::new(dt.into(), shape)])
    }
}

/// 按尾部对齐广播两个形状，长度为 1 的维度可以扩展。
pub fn broadcast(a: &[usize], b: &[usize]) -> Option<Box<[usize]>> {
    let mut ans = a
        .iter()
        .rev()
        .zip_longest(b.iter().rev())
        .map(|pair| match pair {
            Both(&x, &y) if x == y || y == 1 => Some(x),
            Both(&1, &y) => Some(y),
            Both(..) => None,
            Left(&d) | Right(&d) => Some(d),
        })
        .collect::<Option<Vec<_>>>()?;
    ans.reverse();
    Some(ans.into())
}
