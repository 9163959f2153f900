//! Declares a typed builder: the snapshot wrapper, the conversions every
//! builder shares and the keyword capabilities.

macro_rules! schema_builder {
    ($(#[$meta:meta])* $name:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            snapshot: $crate::snapshot::Snapshot,
        }

        impl $crate::base::sealed::Sealed for $name {
            fn from_snapshot(snapshot: $crate::snapshot::Snapshot) -> Self {
                Self { snapshot }
            }

            fn as_snapshot(&self) -> &$crate::snapshot::Snapshot {
                &self.snapshot
            }
        }

        impl $crate::base::Schema for $name {}

        // Every family is reachable; a keyword outside the node's type
        // fails with `TypeMismatch` when called.
        impl $crate::base::BaseKeywords for $name {}
        impl $crate::string::StringKeywords for $name {}
        impl $crate::number::NumberKeywords for $name {}
        impl $crate::array::ArrayKeywords for $name {}
        impl $crate::object::ObjectKeywords for $name {}

        impl $name {
            pub(crate) fn into_snapshot(self) -> $crate::snapshot::Snapshot {
                self.snapshot
            }
        }

        impl From<$name> for $crate::node::SchemaNode {
            fn from(builder: $name) -> Self {
                $crate::node::SchemaNode::$variant(builder)
            }
        }

        impl From<$name> for $crate::arg::SchemaArg {
            fn from(builder: $name) -> Self {
                $crate::arg::SchemaArg::Schema(builder.into())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::base::Schema::value_of(self), serializer)
            }
        }
    };
}
