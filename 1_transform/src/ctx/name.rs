use std::collections::HashMap;

/// 命名空间栈。每层记录路径和该层已经用过的名字。
pub(super) struct Namespace(Vec<Scope>);

struct Scope {
    path: String,
    used: HashMap<String, usize>,
}

impl Namespace {
    pub fn new(root: impl ToString) -> Self {
        Self(vec![Scope::new(root.to_string())])
    }

    pub fn path(&self) -> &str {
        &self.top().path
    }

    /// 在当前层登记 `name`。首次出现原样返回，重复出现的加序号。
    pub fn decorate(&mut self, name: String) -> String {
        let count = self.top_mut().used.entry(name.clone()).or_insert(0);
        *count += 1;
        match *count {
            1 => name,
            n => format!("{name}-{n}"),
        }
    }

    pub fn push(&mut self, name: impl ToString) {
        let name = self.decorate(name.to_string());
        let path = format!("{}.{name}", self.path());
        self.0.push(Scope::new(path))
    }

    pub fn pop(&mut self) {
        assert!(self.0.len() > 1, "cannot pop root namespace");
        self.0.pop();
    }

    fn top(&self) -> &Scope {
        // 根层不会被弹出
        &self.0[self.0.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Scope {
        let last = self.0.len() - 1;
        &mut self.0[last]
    }
}

impl Scope {
    fn new(path: String) -> Self {
        Self {
            path,
            used: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Namespace;

    #[test]
    fn test_decorate() {
        let mut ns = Namespace::new("Ω");
        assert_eq!(ns.decorate("add".into()), "add");
        assert_eq!(ns.decorate("add".into()), "add-2");
        assert_eq!(ns.decorate("mul".into()), "mul");

        ns.push("blk");
        assert_eq!(ns.path(), "Ω.blk");
        assert_eq!(ns.decorate("add".into()), "add");
        ns.pop();
        ns.push("blk");
        assert_eq!(ns.path(), "Ω.blk-2");
        ns.pop();
        assert_eq!(ns.path(), "Ω");
        assert_eq!(ns.decorate("add".into()), "add-3")
    }
}
