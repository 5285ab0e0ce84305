use crate::DataType;

impl DataType {
    /// 提升优先级，两种类型相遇时优先级高者胜出。
    ///
    /// - 布尔类型最弱；
    /// - 任意浮点类型强于任意整数类型；
    /// - 同类之间位宽大者胜出；
    /// - 同位宽的整数中有符号类型胜出，同位宽的浮点中 bf16 胜出。
    pub const fn rank(self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::U8 => 1,
            Self::I8 => 2,
            Self::U16 => 3,
            Self::I16 => 4,
            Self::U32 => 5,
            Self::I32 => 6,
            Self::U64 => 7,
            Self::I64 => 8,
            Self::F16 => 9,
            Self::BF16 => 10,
            Self::F32 => 11,
            Self::F64 => 12,
        }
    }
}

/// 从两个输入类型中选出二元运算的结果类型。
///
/// ```rust
/// # use dtype::{DataType, pick_pairwise};
/// assert_eq!(pick_pairwise(DataType::F32, DataType::F64), DataType::F64);
/// assert_eq!(pick_pairwise(DataType::I32, DataType::Bool), DataType::I32);
/// ```
pub const fn pick_pairwise(a: DataType, b: DataType) -> DataType {
    if a.rank() >= b.rank() { a } else { b }
}

#[cfg(test)]
mod test {
    use super::pick_pairwise;
    use crate::DataType::{self, *};

    #[test]
    fn test_rank_unique() {
        let mut ranks = DataType::ALL.map(DataType::rank);
        ranks.sort_unstable();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]))
    }

    #[test]
    fn test_same() {
        for ty in DataType::ALL {
            assert_eq!(pick_pairwise(ty, ty), ty)
        }
    }

    #[test]
    fn test_bool_weakest() {
        for ty in DataType::ALL {
            assert_eq!(pick_pairwise(Bool, ty), ty);
            assert_eq!(pick_pairwise(ty, Bool), ty)
        }
    }

    #[test]
    fn test_float_over_int() {
        for a in DataType::ALL.into_iter().filter(|t| t.is_float()) {
            for b in DataType::ALL.into_iter().filter(|t| t.is_int()) {
                assert_eq!(pick_pairwise(a, b), a);
                assert_eq!(pick_pairwise(b, a), a)
            }
        }
    }

    #[test]
    fn test_wider() {
        assert_eq!(pick_pairwise(F32, F64), F64);
        assert_eq!(pick_pairwise(F16, F32), F32);
        assert_eq!(pick_pairwise(F16, BF16), BF16);
        assert_eq!(pick_pairwise(I8, I64), I64);
        assert_eq!(pick_pairwise(U64, I32), U64);
        assert_eq!(pick_pairwise(U16, I8), U16);
        assert_eq!(pick_pairwise(U32, I32), I32);
        assert_eq!(pick_pairwise(I64, U64), I64)
    }

    #[test]
    fn test_integer_width() {
        for a in DataType::ALL.into_iter().filter(|t| t.is_int()) {
            for b in DataType::ALL.into_iter().filter(|t| t.is_int()) {
                let c = pick_pairwise(a, b);
                assert_eq!(c.nbytes(), a.nbytes().max(b.nbytes()), "{a} ⊕ {b} = {c}")
            }
        }
    }
}
