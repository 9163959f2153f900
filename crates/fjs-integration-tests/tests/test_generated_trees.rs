//! Property tests: randomly composed builder trees always serialize to a
//! document the draft-07 validator accepts, and survive import unchanged.

use fjs_core::BuilderOptions;
use fjs_schema::prelude::*;
use fjs_schema::{FluentSchema, SchemaNode};
use jsonschema::Draft;
use proptest::prelude::*;

fn factory() -> FluentSchema {
    FluentSchema::new(BuilderOptions::draft07().with_generate_ids(true))
}

fn leaf() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        (0u32..10).prop_map(|n| SchemaNode::from(
            factory().string().max_length(n).unwrap()
        )),
        (-50i64..50, 1i64..50).prop_map(|(lo, span)| SchemaNode::from(
            factory()
                .integer()
                .minimum(lo)
                .unwrap()
                .maximum(lo + span)
                .unwrap()
        )),
        any::<bool>().prop_map(|b| SchemaNode::from(factory().boolean().const_value(b))),
        Just(SchemaNode::from(factory().null())),
        proptest::collection::vec("[a-z]{1,4}", 1..4).prop_map(|values| SchemaNode::from(
            factory().string().enum_values(serde_json::json!(values)).unwrap()
        )),
        (0u32..10).prop_map(|n| SchemaNode::from(
            factory()
                .mixed(["string", "null"])
                .unwrap()
                .max_length(n)
                .unwrap()
        )),
    ]
}

/// Composition and conditionals over leaves. Leaf members carry no
/// generated ids, so nesting these at any depth cannot repeat an id.
fn combined() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        (0u32..5, proptest::collection::vec(leaf(), 1..3)).prop_map(|(n, members)| {
            SchemaNode::from(
                factory()
                    .string()
                    .min_length(n)
                    .unwrap()
                    .any_of(members)
                    .unwrap(),
            )
        }),
        (leaf(), leaf(), leaf()).prop_map(|(i, t, e)| {
            SchemaNode::from(factory().base().if_then_else(i, t, e).unwrap())
        }),
        leaf().prop_map(|banned| {
            SchemaNode::from(
                factory()
                    .integer()
                    .minimum(0)
                    .unwrap()
                    .not(banned)
                    .unwrap(),
            )
        }),
    ]
}

fn tree() -> impl Strategy<Value = SchemaNode> {
    leaf().prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(("[a-z]{1,6}", inner, any::<bool>()), 0..5).prop_map(
                |props| {
                    let mut obj = factory().object();
                    for (name, child, required) in props {
                        obj = obj.prop_schema(name.clone(), child);
                        if required {
                            obj = obj.required_names([name]);
                        }
                    }
                    SchemaNode::from(obj)
                }
            ),
            leaf().prop_map(|item| SchemaNode::from(factory().array().items(item).unwrap())),
            combined(),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_documents_are_valid_draft07(node in tree()) {
        let doc = node.value_of();
        let compiled = jsonschema::options().with_draft(Draft::Draft7).build(&doc);
        prop_assert!(compiled.is_ok(), "{:?}\n{:#}", compiled.err(), doc);
    }

    #[test]
    fn generated_documents_round_trip(node in tree()) {
        let rebuilt = factory().import(&node.value_of()).unwrap();
        prop_assert_eq!(rebuilt.to_json_string(), node.to_json_string());
    }
}
