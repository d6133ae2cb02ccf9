use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::graph::model::DependencyGraph;
use crate::types::Field;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dependency cycle detected: {}", .cycle.join(" -> "))]
pub struct CycleError {
    /// One cycle in `dependsOn` direction, closed (first id repeated at the end).
    pub cycle: Vec<String>,
}

/// Builds the field dependency graph from `dependsOn ∪ refreshOn`.
///
/// References to unknown ids are ignored here; the validator reports them.
pub fn build_dependency_graph(fields: &[Field]) -> Result<DependencyGraph, CycleError> {
    let ids: BTreeSet<String> = fields.iter().map(|f| f.id.clone()).collect();
    let dynamic: BTreeSet<String> = fields
        .iter()
        .filter(|f| f.is_dynamic())
        .map(|f| f.id.clone())
        .collect();

    let mut depends_on: BTreeMap<String, Vec<String>> =
        ids.iter().map(|id| (id.clone(), Vec::new())).collect();
    for field in fields {
        let mut d: Vec<String> = field
            .triggers()
            .into_iter()
            .filter(|x| ids.contains(*x))
            .map(str::to_string)
            .collect();
        d.sort();
        d.dedup();
        depends_on.insert(field.id.clone(), d);
    }

    let mut dependents: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, deps) in &depends_on {
        if !dynamic.contains(field) {
            continue;
        }
        for d in deps {
            dependents.entry(d.clone()).or_default().push(field.clone());
        }
    }
    for v in dependents.values_mut() {
        v.sort();
    }

    let topo_order = topo_sort(&ids, &depends_on)?;
    let levels = compute_levels(&topo_order, &depends_on);

    Ok(DependencyGraph {
        depends_on,
        dependents,
        levels,
        topo_order,
    })
}

fn topo_sort(
    nodes: &BTreeSet<String>,
    depends_on: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<String>, CycleError> {
    let mut indeg: BTreeMap<&str, usize> = nodes.iter().map(|n| (n.as_str(), 0)).collect();
    let mut outgoing: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for (n, deps) in depends_on {
        for d in deps {
            if !nodes.contains(d) {
                continue;
            }
            if let Some(e) = indeg.get_mut(n.as_str()) {
                *e += 1;
            }
            outgoing.entry(d.as_str()).or_default().push(n.as_str());
        }
    }

    for v in outgoing.values_mut() {
        v.sort();
    }

    let mut q: VecDeque<&str> = indeg
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();

    let mut out = Vec::with_capacity(nodes.len());
    while let Some(n) = q.pop_front() {
        out.push(n.to_string());
        if let Some(nexts) = outgoing.get(n) {
            for m in nexts {
                if let Some(e) = indeg.get_mut(m) {
                    *e -= 1;
                    if *e == 0 {
                        q.push_back(*m);
                    }
                }
            }
        }
    }

    if out.len() != nodes.len() {
        let remaining: BTreeSet<&str> = indeg
            .iter()
            .filter(|(_, d)| **d > 0)
            .map(|(n, _)| *n)
            .collect();
        return Err(CycleError {
            cycle: find_cycle(&remaining, depends_on),
        });
    }
    Ok(out)
}

/// Every node left over by Kahn's algorithm still has an unresolved dependency inside the
/// leftover set, so walking dependencies from any of them must revisit a node.
fn find_cycle(remaining: &BTreeSet<&str>, depends_on: &BTreeMap<String, Vec<String>>) -> Vec<String> {
    let Some(start) = remaining.iter().next() else {
        return Vec::new();
    };
    let mut path: Vec<&str> = Vec::new();
    let mut cur = *start;
    loop {
        if let Some(pos) = path.iter().position(|n| *n == cur) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|s| s.to_string()).collect();
            cycle.push(cycle[0].clone());
            return cycle;
        }
        path.push(cur);
        let next = depends_on
            .get(cur)
            .and_then(|deps| deps.iter().find(|d| remaining.contains(d.as_str())));
        match next {
            Some(n) => cur = n.as_str(),
            None => return path.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub(crate) fn compute_levels(
    topo: &[String],
    depends_on: &BTreeMap<String, Vec<String>>,
) -> Vec<Vec<String>> {
    let mut level: BTreeMap<&str, usize> = BTreeMap::new();
    for node in topo {
        let deps = depends_on.get(node).map(|v| v.as_slice()).unwrap_or(&[]);
        let l = deps
            .iter()
            .filter_map(|d| level.get(d.as_str()).copied())
            .max()
            .map(|m| m + 1)
            .unwrap_or(0);
        level.insert(node.as_str(), l);
    }

    if topo.is_empty() {
        return Vec::new();
    }
    let max_level = level.values().copied().max().unwrap_or(0);
    let mut levels = vec![Vec::<String>::new(); max_level + 1];
    for node in topo {
        if let Some(l) = level.get(node.as_str()) {
            levels[*l].push(node.clone());
        }
    }
    levels
}
