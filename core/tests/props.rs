//! Property tests for alias resolution, object construction and pagination.
//!
//! Each property is checked over generated inputs: every object kind, arbitrary
//! ids and text, and simulated servers that return pages of any size, so the
//! invariants hold beyond the hand-picked cases in the other suites.

use std::cell::RefCell;

use everyaction_core::{catalog, paginate, to_snake, ApiError, Args, EaObject, ObjectKind, Page, PageRequest, Value};
use proptest::prelude::*;
use serde_json::json;

fn arb_kind() -> impl Strategy<Value = ObjectKind> {
    prop::sample::select(ObjectKind::ALL.to_vec())
}

fn arb_kind_with_id() -> impl Strategy<Value = ObjectKind> {
    let with_id: Vec<ObjectKind> = ObjectKind::ALL
        .iter()
        .copied()
        .filter(|kind| catalog::object_type(*kind).unwrap().id_slot().is_some())
        .collect();
    prop::sample::select(with_id)
}

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{0,20}"
}

// Every declared property can be reached through its snake_case form.
proptest! {
    #[test]
    fn prop_snake_form_resolves_to_canonical(kind in arb_kind(), pick in any::<prop::sample::Index>()) {
        let ty = catalog::object_type(kind).unwrap();
        let properties = ty.params().properties();
        prop_assume!(!properties.is_empty());
        let property = &properties[pick.index(properties.len())];

        let hit = ty.params().lookup(&to_snake(&property.name)).unwrap();
        prop_assert_eq!(hit.canonical, property.name.as_str());
        prop_assert!(!hit.singular);
    }
}

// An integer primary always lands in the id slot.
proptest! {
    #[test]
    fn prop_integer_primary_is_the_id(kind in arb_kind_with_id(), id in any::<i64>()) {
        let object = EaObject::from_primary(kind, id).unwrap();
        prop_assert_eq!(object.id(), Some(id));
        prop_assert_eq!(object.iter().count(), 1);
    }
}

// A list property given through both its singular and plural names is ambiguous.
proptest! {
    #[test]
    fn prop_singular_and_plural_together_are_ambiguous(email in "[a-z]{1,8}@[a-z]{1,8}\\.org", reversed in any::<bool>()) {
        let plural = ("emails", Value::from(vec![email.clone()]));
        let singular = ("email", Value::from(email));
        let keywords = if reversed { vec![singular, plural] } else { vec![plural, singular] };

        let err = EaObject::from_keywords(ObjectKind::Person, keywords).unwrap_err();
        let is_ambiguous = matches!(err, ApiError::AmbiguousArgument { .. });
        prop_assert!(is_ambiguous, "unexpected error: {:?}", err);
    }
}

// Setting a property through an alias is indistinguishable from the canonical name.
proptest! {
    #[test]
    fn prop_alias_and_canonical_are_equivalent(
        first in arb_text(),
        alias in prop_oneof![Just("first"), Just("first_name"), Just("firstName")],
    ) {
        let by_alias = EaObject::from_keywords(ObjectKind::Person, [(alias, first.clone())]).unwrap();
        let by_name = EaObject::from_keywords(ObjectKind::Person, [("firstName", first.clone())]).unwrap();

        prop_assert_eq!(&by_alias, &by_name);
        prop_assert_eq!(by_alias.to_json(), json!({"firstName": first}));
    }
}

// Undeclared response keys survive decoding, and unset properties are never emitted.
proptest! {
    #[test]
    fn prop_unknown_keys_kept_and_unset_omitted(key in "zz[a-z]{1,10}", note in arb_text()) {
        let mut object = EaObject::from_json(
            ObjectKind::Note,
            json!({"noteId": 3, "text": note, key.clone(): 7}),
        )
        .unwrap();
        prop_assert_eq!(object.extras().get(&key), Some(&Value::from(7)));

        object.unset("text").unwrap();
        prop_assert_eq!(object.to_json(), json!({"noteId": 3, key: 7}));
    }
}

// Pagination returns min(limit, total) items in order and never over-asks.
proptest! {
    #[test]
    fn prop_pagination_collects_in_order(
        total in 0u32..120,
        limit in 0u32..60,
        max_top in 1u32..30,
        server_cap in 1u32..40,
    ) {
        let calls = RefCell::new(Vec::new());
        let items = paginate(PageRequest { limit, skip: 0, max_top }, |top, skip| {
            calls.borrow_mut().push((top, skip));
            let served = top.min(server_cap).min(total.saturating_sub(skip));
            Ok(Page {
                items: (skip..skip + served).map(|i| json!(i)).collect(),
                next_page_link: (skip + served < total).then(|| "next".to_string()),
                count: Some(u64::from(total)),
            })
        })
        .unwrap();

        let expected = if limit == 0 { total } else { limit.min(total) };
        let numbered: Vec<u32> = items.iter().map(|i| i.as_u64().unwrap() as u32).collect();
        prop_assert_eq!(numbered, (0..expected).collect::<Vec<_>>());

        let calls = calls.into_inner();
        prop_assert!(!calls.is_empty());
        for (top, _) in &calls {
            prop_assert!(*top >= 1 && *top <= max_top);
        }
        let skips: Vec<u32> = calls.iter().map(|(_, skip)| *skip).collect();
        prop_assert!(skips.windows(2).all(|w| w[0] < w[1]));
    }
}

// Paginated calls carry limit and skip through to the page request.
proptest! {
    #[test]
    fn prop_limit_and_skip_reach_the_page_request(limit in 0u32..500, skip in 0u32..500) {
        let schema = catalog::catalog().unwrap().endpoint("activist_codes.list").unwrap();
        let call = schema.resolve(&[], Args::new().limit(limit).skip(skip), 50).unwrap();
        let page = call.page.unwrap();
        prop_assert_eq!(page.limit, limit);
        prop_assert_eq!(page.skip, skip);
    }
}
