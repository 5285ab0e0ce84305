mod graph;
mod name;
mod tensor;

use crate::op::{Operator, PairwiseTransform, ScalarCompare};
use std::{collections::HashMap, sync::Arc};

pub use graph::Context;
pub use tensor::{Tensor, TensorMeta};

/// 算子库，按名字查找算子定义。
#[derive(Clone)]
pub struct OpLib(HashMap<String, Arc<dyn Operator>>);

impl Default for OpLib {
    fn default() -> Self {
        let mut lib = Self::empty();
        for op in PairwiseTransform::ALL {
            lib.register(op.name(), op)
        }
        for op in ScalarCompare::ALL {
            lib.register(op.name(), op);
            for syn in op.synonyms() {
                lib.alias(*syn, op.name());
            }
        }
        lib
    }
}

impl OpLib {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// 注册算子，同名算子会被替换。
    pub fn register(&mut self, name: impl ToString, op: impl Operator + 'static) {
        self.0.insert(name.to_string(), Arc::new(op));
    }

    /// 为已注册的 `name` 添加别名，`name` 不存在时返回 `false`。
    pub fn alias(&mut self, synonym: impl ToString, name: &str) -> bool {
        match self.0.get(name) {
            Some(op) => {
                let op = op.clone();
                self.0.insert(synonym.to_string(), op);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.0.get(name).map(|op| &**op)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

pub struct GraphBuilder {
    op_lib: Arc<OpLib>,
    target: Arc<str>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(OpLib::default())
    }
}

impl GraphBuilder {
    pub fn new(op_lib: OpLib) -> Self {
        Self {
            op_lib: Arc::new(op_lib),
            target: module_path!().into(),
        }
    }

    /// 设置构图日志输出的 target。
    pub fn log_target(mut self, target: impl AsRef<str>) -> Self {
        self.target = target.as_ref().into();
        self
    }

    pub fn op_lib(&self) -> &OpLib {
        &self.op_lib
    }
}
