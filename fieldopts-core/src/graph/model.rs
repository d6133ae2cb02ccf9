use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::graph::dependency::compute_levels;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DependencyGraph {
    /// For each field, which fields it depends on (`dependsOn ∪ refreshOn`).
    pub depends_on: BTreeMap<String, Vec<String>>,
    /// Reverse adjacency: for each field, the dynamic fields that must refresh when it changes.
    pub dependents: BTreeMap<String, Vec<String>>,
    /// Fields grouped by dependency depth.
    pub levels: Vec<Vec<String>>,
    /// A deterministic topological order.
    pub topo_order: Vec<String>,
}

impl DependencyGraph {
    pub fn dependencies_of(&self, field_id: &str) -> &[String] {
        self.depends_on
            .get(field_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn dependents_of(&self, field_id: &str) -> &[String] {
        self.dependents
            .get(field_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn depth(&self, field_id: &str) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|f| f == field_id))
    }

    /// Dynamic fields reachable from `changed` through the reverse adjacency, in an order
    /// where every field comes after all of its own dependencies. `changed` is excluded.
    pub fn affected_by(&self, changed: &str) -> Vec<String> {
        let reached = self.reachable_from(changed);
        self.topo_order
            .iter()
            .filter(|f| reached.contains(f.as_str()))
            .cloned()
            .collect()
    }

    /// The affected set of `changed`, grouped so that each group only depends on earlier
    /// groups (or on fields outside the cascade). Fields inside a group are independent.
    pub fn cascade_levels(&self, changed: &str) -> Vec<Vec<String>> {
        let affected = self.affected_by(changed);
        if affected.is_empty() {
            return Vec::new();
        }
        let in_cascade: BTreeSet<&str> = affected.iter().map(String::as_str).collect();
        let local: BTreeMap<String, Vec<String>> = affected
            .iter()
            .map(|f| {
                let deps = self
                    .dependencies_of(f)
                    .iter()
                    .filter(|d| in_cascade.contains(d.as_str()))
                    .cloned()
                    .collect();
                (f.clone(), deps)
            })
            .collect();
        compute_levels(&affected, &local)
    }

    fn reachable_from(&self, changed: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut q = VecDeque::new();
        q.push_back(changed.to_string());
        while let Some(n) = q.pop_front() {
            for m in self.dependents_of(&n) {
                if m != changed && seen.insert(m.clone()) {
                    q.push_back(m.clone());
                }
            }
        }
        seen
    }

    pub fn to_dot(&self, schema_name: &str) -> String {
        let mut out = String::new();
        out.push_str("digraph fieldopts {\n");
        out.push_str(&format!("  label=\"form: {schema_name}\";\n"));
        out.push_str("  labelloc=t;\n");
        out.push_str("  rankdir=LR;\n");

        for (field, deps) in &self.depends_on {
            if deps.is_empty() {
                out.push_str(&format!("  \"{field}\";\n"));
            } else {
                for dep in deps {
                    out.push_str(&format!("  \"{dep}\" -> \"{field}\";\n"));
                }
            }
        }

        for level in &self.levels {
            if level.len() > 1 {
                out.push_str("  { rank=same; ");
                for f in level {
                    out.push_str(&format!("\"{f}\"; "));
                }
                out.push_str("}\n");
            }
        }

        out.push_str("}\n");
        out
    }
}
