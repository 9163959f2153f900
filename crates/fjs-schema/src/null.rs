//! Null builder.

use std::sync::Arc;

use fjs_core::{BuilderOptions, SchemaType, TypeSet};

use crate::base::sealed::Sealed;
use crate::snapshot::Snapshot;

schema_builder! {
    /// A `null` node.
    NullSchema => Null
}


impl NullSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Null, options))
    }

    /// Fix the node's type to `null`.
    pub fn null(&self) -> Self {
        self.map_snapshot(|node| node.with_types(Some(TypeSet::Single(SchemaType::Null))))
    }
}

#[cfg(test)]
mod tests {
    use crate::null;
    use crate::prelude::*;
    use serde_json::json;

    #[test]
    fn test_null() {
        assert_eq!(null().value_of(), json!({"type": "null"}));
        assert_eq!(null().null().description("nothing").value_of(), json!({
            "type": "null",
            "description": "nothing"
        }));
    }
}
