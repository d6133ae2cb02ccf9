mod builder;
mod descriptor;

use std::collections::BTreeMap;

use crate::graph::DependencyGraph;
use crate::types::Field;

pub use builder::{DynamicOptions, FieldBuilder, SchemaBuilder};
pub use descriptor::{FieldDescriptor, LoadOptions, SchemaDescriptor};

/// A validated, immutable set of form fields.
///
/// Only [`SchemaBuilder::build`] produces one, so every instance has unique ids, resolvable
/// dependency references, and an acyclic dependency relation.
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: String,
    fields: Vec<Field>,
    index: BTreeMap<String, usize>,
    graph: DependencyGraph,
}

impl FormSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub(crate) fn from_parts(name: String, fields: Vec<Field>, graph: DependencyGraph) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id.clone(), i))
            .collect();
        Self {
            name,
            fields,
            index,
            graph,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.index.get(id).map(|i| &self.fields[*i])
    }

    pub fn dynamic_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_dynamic())
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn descriptor(&self) -> SchemaDescriptor {
        SchemaDescriptor::from_schema(self)
    }
}
