use super::{GraphBuilder, OpLib, Tensor, TensorMeta, name::Namespace};
use crate::{Graph, NNError, Network, Node, op::OpError};
use std::{cell::RefCell, fmt::Display, rc::Rc, sync::Arc};

#[derive(Clone)]
pub struct Context(Rc<RefCell<Internal>>);

impl GraphBuilder {
    pub fn build<NN: Network>(
        &self,
        nn: NN,
        inputs: impl IntoIterator<Item = TensorMeta>,
    ) -> Result<Graph, NNError> {
        let (mut ctx, inputs) = self.new_context(inputs);
        let outputs = nn.launch(inputs, &mut ctx)?;
        Ok(ctx.into_graph(outputs))
    }

    fn new_context(&self, global_inputs: impl IntoIterator<Item = TensorMeta>) -> (Context, Vec<Tensor>) {
        let tensors = global_inputs.into_iter().collect::<Vec<_>>();
        let n_inputs = tensors.len();
        log::trace!(target: &*self.target, "new graph with {n_inputs} inputs");

        let ctx = Context(Rc::new(RefCell::new(Internal {
            op_lib: self.op_lib.clone(),
            target: self.target.clone(),
            namespace: Namespace::new("Ω"),
            nodes: Vec::new(),
            tensors,
            n_inputs,
        })));
        let tensors = (0..n_inputs).map(|idx| ctx.tensor(idx)).collect();
        (ctx, tensors)
    }
}

struct Internal {
    op_lib: Arc<OpLib>,
    target: Arc<str>,
    namespace: Namespace,
    nodes: Vec<Node>,
    tensors: Vec<TensorMeta>,
    n_inputs: usize,
}

impl Context {
    pub fn path(&self) -> String {
        self.0.borrow().namespace.path().to_string()
    }

    /// 在子命名空间 `name` 中展开 `nn`。
    pub fn trap<NN: Network>(
        &mut self,
        name: impl ToString,
        nn: NN,
        inputs: impl IntoIterator<Item = Tensor>,
    ) -> Result<Vec<Tensor>, NNError> {
        self.0.borrow_mut().namespace.push(name);
        let outputs = nn.launch(inputs.into_iter().collect(), self);
        self.0.borrow_mut().namespace.pop();
        outputs
    }

    /// 向图中添加一个算子节点。节点加入前先完成输出推导，推导失败时图保持不变。
    pub fn call(
        &mut self,
        name: impl Display,
        op: impl AsRef<str>,
        inputs: impl IntoIterator<Item = Tensor>,
    ) -> Result<Vec<Tensor>, NNError> {
        let inputs = inputs.into_iter().map(|t| t.idx).collect::<Box<_>>();

        let mut guard = self.0.borrow_mut();
        let internal = &mut *guard;

        let op = op.as_ref();
        // 没有设置名字的，使用 op 名作为名字
        let mut name = name.to_string();
        if name.is_empty() {
            name = op.into()
        }

        let Some(operator) = internal.op_lib.get(op) else {
            let name = format!("{}:{name}", internal.namespace.path());
            log::warn!(target: &*internal.target, "{name}: operator \"{op}\" not exist");
            return Err(NNError {
                name,
                err: OpError::NotExist,
            });
        };

        let meta = inputs
            .iter()
            .map(|&i| internal.tensors[i].clone())
            .collect::<Vec<_>>();
        let meta = match operator.infer(&meta) {
            Ok(meta) => meta,
            Err(err) => {
                let name = format!("{}:{name}", internal.namespace.path());
                log::warn!(target: &*internal.target, "{name}: {err}");
                return Err(NNError { name, err });
            }
        };

        // 推导成功后才占用名字，重复的加序号
        let name = internal.namespace.decorate(name);
        let name = format!("{}:{name}", internal.namespace.path());

        let start = internal.tensors.len();
        internal.tensors.extend(meta);
        let end = internal.tensors.len();

        log::debug!(
            target: &*internal.target,
            "{name} = {op}({}) -> {}",
            display_list(&inputs, |i| format!("%{i}")),
            display_list(&internal.tensors[start..end], ToString::to_string),
        );

        internal.nodes.push(Node {
            name,
            op: op.into(),
            inputs,
            outputs: start..end,
        });

        Ok((start..end).map(|idx| self.tensor(idx)).collect())
    }
}

impl Context {
    pub(super) fn get_meta(&self, i: usize) -> TensorMeta {
        self.0.borrow().tensors[i].clone()
    }

    fn tensor(&self, idx: usize) -> Tensor {
        Tensor {
            idx,
            ctx: self.clone(),
        }
    }

    fn into_graph(self, global_outputs: Vec<Tensor>) -> Graph {
        let outputs = global_outputs
            .into_iter()
            .map(|t| t.idx)
            .collect::<Box<_>>();

        let mut internal = self.0.borrow_mut();
        let nodes = std::mem::take(&mut internal.nodes);
        let edges = std::mem::take(&mut internal.tensors);
        let n_inputs = internal.n_inputs;

        log::trace!(
            target: &*internal.target,
            "graph built: {} nodes, {} edges, {} outputs",
            nodes.len(),
            edges.len(),
            outputs.len(),
        );

        Graph {
            nodes: nodes.into(),
            edges: edges.into(),
            inputs: (0..n_inputs).collect(),
            outputs,
        }
    }
}

fn display_list<T>(items: &[T], f: impl Fn(&T) -> String) -> String {
    items.iter().map(f).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod test {
    use crate::{
        Context, DataType, GraphBuilder, NNError, Network, OpError, Tensor, TensorMeta,
        macros::destruct,
    };
    use digit_layout::types as ty;

    /// y = (a + b) * b
    struct AddMul;

    impl Network for AddMul {
        fn launch(self, inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError> {
            destruct!([a, b] = inputs);
            destruct!([c] = ctx.call("", "add", [a, b.clone()])?);
            ctx.call("", "multiply", [c, b])
        }
    }

    struct Blocks(usize);

    impl Network for Blocks {
        fn launch(self, mut inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError> {
            for _ in 0..self.0 {
                inputs = ctx
                    .trap("blk", AddMul, inputs.clone())
                    .map(|mut out| {
                        out.push(inputs[1].clone());
                        out
                    })?;
            }
            inputs.truncate(1);
            Ok(inputs)
        }
    }

    #[test]
    fn test_build() {
        let graph = GraphBuilder::default()
            .build(
                AddMul,
                [
                    TensorMeta::new(ty::F16, [4, 8]),
                    TensorMeta::new(ty::F32, [8]),
                ],
            )
            .unwrap();

        assert_eq!(graph.inputs.len(), 2);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].name, "Ω:add");
        assert_eq!(graph.nodes[1].name, "Ω:multiply");
        assert_eq!(&*graph.nodes[1].inputs, [2, 1]);
        assert_eq!(&*graph.outputs, [3]);
        assert_eq!(graph.edges[3], TensorMeta::new(ty::F32, [4, 8]));
        assert_eq!(graph.output_types().unwrap(), [DataType::F32])
    }

    #[test]
    fn test_trap() {
        let graph = GraphBuilder::default()
            .build(
                Blocks(2),
                [TensorMeta::new(ty::I32, [3]), TensorMeta::new(ty::Bool, [3])],
            )
            .unwrap();

        let names = graph.nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Ω.blk:add",
                "Ω.blk:multiply",
                "Ω.blk-2:add",
                "Ω.blk-2:multiply"
            ]
        );
        assert!(graph.edges.iter().skip(2).all(|e| e.dt == ty::I32))
    }

    #[test]
    fn test_errors() {
        struct Call(&'static str, usize);

        impl Network for Call {
            fn launch(self, inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError> {
                ctx.call("bad", self.0, inputs.into_iter().take(self.1))
            }
        }

        let inputs = || {
            [
                TensorMeta::new(ty::F32, [2]),
                TensorMeta::new(ty::F32, [2]),
                TensorMeta::new(ty::F32, [2]),
            ]
        };
        let builder = GraphBuilder::default().log_target("test");

        let err = builder.build(Call("conv", 2), inputs()).err().unwrap();
        assert_eq!(err.name, "Ω:bad");
        assert_eq!(err.err, OpError::NotExist);

        for n in [0, 1, 3] {
            let err = builder.build(Call("add", n), inputs()).err().unwrap();
            assert!(err.err.is_arity());
            assert_eq!(
                err.to_string(),
                format!("Ω:bad: add expects exactly 2 input data types, got {n}")
            )
        }
    }

    #[test]
    fn test_failed_call_keeps_name() {
        struct Retry;

        impl Network for Retry {
            fn launch(self, inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError> {
                destruct!([a, b] = inputs);
                let err = ctx.call("x", "conv", [a.clone(), b.clone()]).err().unwrap();
                assert_eq!(err.name, "Ω:x");
                let err = ctx.call("x", "add", [a.clone()]).err().unwrap();
                assert_eq!(err.name, "Ω:x");
                ctx.call("x", "add", [a, b])
            }
        }

        let graph = GraphBuilder::default()
            .build(Retry, [TensorMeta::new(ty::I8, [2]), TensorMeta::new(ty::I8, [2])])
            .unwrap();
        let names = graph.nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Ω:x"]);
        assert_eq!(graph.edges.len(), 3)
    }

    #[test]
    fn test_tensor_handle() {
        struct Check;

        impl Network for Check {
            fn launch(self, inputs: Vec<Tensor>, ctx: &mut Context) -> Result<Vec<Tensor>, NNError> {
                destruct!([x, y] = inputs);
                assert_eq!(x.dt(), ty::U8);
                destruct!([z] = ctx.call("cmp", "Equals", [x, y])?);
                assert_eq!(z.dt(), ty::Bool);
                assert!(z.shape().is_empty());
                assert_eq!(ctx.path(), "Ω");
                Ok(vec![z])
            }
        }

        let graph = GraphBuilder::default()
            .build(Check, [TensorMeta::new(ty::U8, []), TensorMeta::new(ty::F64, [1])])
            .unwrap();
        assert_eq!(graph.nodes[0].op, "Equals");
        assert_eq!(graph.nodes[0].name, "Ω:cmp")
    }
}
