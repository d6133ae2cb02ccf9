mod binding;
mod field;
mod option;
mod pagination;
mod values;

pub use binding::DynamicBinding;
pub use field::{Field, FieldId, FieldKind, FieldType};
pub use option::{DynamicOptionsResponse, OptionItem, RecordMapping};
pub use pagination::{paginate_slice, Pagination};
pub use values::{is_blank, FieldValues};
