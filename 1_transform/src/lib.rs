mod ctx;
mod graph;

pub mod op;

pub use ctx::{Context, GraphBuilder, OpLib, Tensor, TensorMeta};
pub use dtype::{DataType, pick_pairwise};
pub use graph::{Graph, Node};
pub use op::{OpError, Operator, PairwiseTransform, ScalarCompare};

/// 可以展开到计算图上的网络结构。
pub trait Network: Sized {
    fn launch(self, inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError>;
}

/// 构图时算子推导失败，`name` 是出错节点在图中的路径。
#[derive(Clone, Debug, thiserror::Error)]
#[error("{name}: {err}")]
pub struct NNError {
    pub name: String,
    pub err: OpError,
}
