// src/tasks/registry.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{FabError, Result};
use crate::tasks::{Arg, BoundArgs, Param, TaskBody};

/// A registered task: its schema and body.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub name: &'static str,

    /// One-line description shown by `--list`.
    pub doc: &'static str,

    pub params: Vec<Param>,
    pub body: TaskBody,
}

impl TaskSpec {
    /// Bind invocation arguments to this task's parameters.
    ///
    /// Positionals fill parameters in declaration order, keywords by name;
    /// anything left unbound takes its default.
    pub fn bind(&self, args: &[Arg]) -> Result<BoundArgs> {
        let mut values: Vec<Option<String>> = vec![None; self.params.len()];
        let mut next_positional = 0;

        for arg in args {
            let (index, value) = match arg {
                Arg::Positional(value) => {
                    if next_positional >= self.params.len() {
                        return Err(FabError::InvalidInvocation(format!(
                            "task '{}' takes {} argument(s), got more",
                            self.name,
                            self.params.len()
                        )));
                    }
                    next_positional += 1;
                    (next_positional - 1, value)
                }
                Arg::Keyword(key, value) => {
                    let index = self
                        .params
                        .iter()
                        .position(|p| p.name == key.as_str())
                        .ok_or_else(|| {
                            FabError::InvalidInvocation(format!(
                                "task '{}' has no parameter named '{}'",
                                self.name, key
                            ))
                        })?;
                    (index, value)
                }
            };

            if values[index].is_some() {
                return Err(FabError::InvalidInvocation(format!(
                    "parameter '{}' of task '{}' given more than once",
                    self.params[index].name, self.name
                )));
            }
            values[index] = Some(value.clone());
        }

        let mut bound = BoundArgs::default();
        for (param, value) in self.params.iter().zip(values) {
            bound.insert(param.name, value.unwrap_or_else(|| param.default.to_string()));
        }
        Ok(bound)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.body, TaskBody::Sequence(_))
    }
}

/// Explicit name → task mapping, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<&'static str, TaskSpec>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task; a later registration under the same name replaces the
    /// earlier one.
    pub fn register(&mut self, spec: TaskSpec) -> &mut Self {
        self.tasks.insert(spec.name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Result<&TaskSpec> {
        self.tasks
            .get(name)
            .ok_or_else(|| FabError::TaskNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Tasks in name order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskSpec> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check every composite task:
    /// - each step names a registered task
    /// - no step passes more arguments than its target declares
    /// - the composite call graph has no cycles
    pub fn validate(&self) -> Result<()> {
        self.validate_steps()?;
        self.validate_acyclic()?;
        Ok(())
    }

    fn validate_steps(&self) -> Result<()> {
        for spec in self.tasks.values() {
            let TaskBody::Sequence(seq) = &spec.body else {
                continue;
            };

            for step in &seq.steps {
                let target = self.tasks.get(step.task).ok_or_else(|| {
                    FabError::Registry(format!(
                        "task '{}' has unknown step '{}'",
                        spec.name, step.task
                    ))
                })?;

                if step.args.len() > target.params.len() {
                    return Err(FabError::Registry(format!(
                        "task '{}' passes {} argument(s) to '{}', which takes {}",
                        spec.name,
                        step.args.len(),
                        step.task,
                        target.params.len()
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_acyclic(&self) -> Result<()> {
        // Edge direction: composite -> step.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for name in self.tasks.keys() {
            graph.add_node(*name);
        }

        for spec in self.tasks.values() {
            if let TaskBody::Sequence(seq) = &spec.body {
                for step in &seq.steps {
                    graph.add_edge(spec.name, step.task, ());
                }
            }
        }

        match toposort(&graph, None) {
            Ok(_order) => Ok(()),
            Err(cycle) => Err(FabError::Registry(format!(
                "cycle detected in composite tasks involving '{}'",
                cycle.node_id()
            ))),
        }
    }
}
