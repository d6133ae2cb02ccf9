pub(crate) mod dependencies;
pub(crate) mod fields;
pub(crate) mod schema;
