use crate::TensorMeta;
use dtype::{DataType, UnsupportedLayout};
use std::{fmt, ops::Range};

/// 构图结果。节点按加入顺序存储，即拓扑序；边以序号引用。
#[derive(Clone, Debug)]
pub struct Graph {
    pub nodes: Box<[Node]>,
    pub edges: Box<[TensorMeta]>,
    pub inputs: Box<[usize]>,
    pub outputs: Box<[usize]>,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub op: String,
    pub inputs: Box<[usize]>,
    pub outputs: Range<usize>,
}

impl Graph {
    /// 产生边 `edge` 的节点，全图输入没有生产者。
    pub fn producer(&self, edge: usize) -> Option<&Node> {
        self.nodes.iter().find(|n| n.outputs.contains(&edge))
    }

    /// 全图输出的元素类型，执行前用于预分配输出。
    pub fn output_types(&self) -> Result<Vec<DataType>, UnsupportedLayout> {
        self.outputs
            .iter()
            .map(|&i| DataType::try_from(self.edges[i].dt))
            .collect()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &i in &*self.inputs {
            writeln!(f, "%{i}: {}", self.edges[i])?
        }
        for node in &*self.nodes {
            let outputs = node.outputs.clone().map(|i| format!("%{i}"));
            let inputs = node.inputs.iter().map(|i| format!("%{i}"));
            writeln!(
                f,
                "{} = {}({}) # {}",
                outputs.collect::<Vec<_>>().join(", "),
                node.op,
                inputs.collect::<Vec<_>>().join(", "),
                node.name,
            )?
        }
        let outputs = self.outputs.iter().map(|i| format!("%{i}"));
        write!(f, "return {}", outputs.collect::<Vec<_>>().join(", "))
    }
}
