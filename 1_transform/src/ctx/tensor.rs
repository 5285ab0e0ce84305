use super::Context;
use digit_layout::DigitLayout;
use std::fmt;

/// 计算图层张量
#[derive(Clone)]
pub struct Tensor {
    pub(super) idx: usize,
    pub(super) ctx: Context,
}

impl Tensor {
    #[inline]
    pub fn dt(&self) -> DigitLayout {
        self.meta().dt
    }

    #[inline]
    pub fn shape(&self) -> Box<[usize]> {
        self.meta().shape
    }

    #[inline]
    pub fn meta(&self) -> TensorMeta {
        self.ctx.get_meta(self.idx)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TensorMeta {
    pub dt: DigitLayout,
    pub shape: Box<[usize]>,
}

impl TensorMeta {
    pub fn new(dt: DigitLayout, shape: impl IntoIterator<Item = usize>) -> Self {
        let shape = shape.into_iter().collect::<Box<_>>();
        Self { dt, shape }
    }

    #[inline]
    pub const fn dt(&self) -> DigitLayout {
        self.dt
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// 0 维或每一维都为 1。
    pub fn is_scalar(&self) -> bool {
        self.shape.iter().all(|&d| d == 1)
    }
}

impl fmt::Display for TensorMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.dt)?;
        for (i, d) in self.shape.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?
            }
            write!(f, "{d}")?
        }
        write!(f, "]")
    }
}
