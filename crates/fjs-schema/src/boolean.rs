//! Boolean builder. Carries the base keywords only.

use std::sync::Arc;

use fjs_core::{BuilderOptions, SchemaType};

use crate::base::sealed::Sealed;
use crate::snapshot::Snapshot;

schema_builder! {
    /// A `boolean` node.
    BooleanSchema => Boolean
}


impl BooleanSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Boolean, options))
    }
}
