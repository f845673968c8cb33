//! Property-based tests for `HalsteadBag` merging.
//!
//! `merge` is a set union over identifiers with summed totals, so it should
//! behave as a commutative, associative monoid with the empty bag as its
//! identity — these properties are checked directly rather than via any one
//! worked example.

use codescope_core::HalsteadBag;

fn bag_from(identifiers: &[String]) -> HalsteadBag {
    let mut bag = HalsteadBag::new();
    for id in identifiers {
        bag.encounter(id);
    }
    bag
}

proptest::proptest! {
    #[test]
    fn prop_merge_with_empty_is_identity(ids in proptest::collection::vec("[a-c]", 0..8)) {
        let bag = bag_from(&ids);

        let mut left_identity = HalsteadBag::new();
        left_identity.merge(&bag);
        proptest::prop_assert_eq!(left_identity.distinct, bag.distinct);
        proptest::prop_assert_eq!(left_identity.total, bag.total);

        let mut right_identity = bag.clone();
        right_identity.merge(&HalsteadBag::new());
        proptest::prop_assert_eq!(right_identity.distinct, bag.distinct);
        proptest::prop_assert_eq!(right_identity.total, bag.total);
    }

    #[test]
    fn prop_merge_is_associative(
        a in proptest::collection::vec("[a-c]", 0..5),
        b in proptest::collection::vec("[a-c]", 0..5),
        c in proptest::collection::vec("[a-c]", 0..5),
    ) {
        let (bag_a, bag_b, bag_c) = (bag_from(&a), bag_from(&b), bag_from(&c));

        let mut left = bag_a.clone();
        left.merge(&bag_b);
        left.merge(&bag_c);

        let mut bc = bag_b.clone();
        bc.merge(&bag_c);
        let mut right = bag_a.clone();
        right.merge(&bc);

        proptest::prop_assert_eq!(left.distinct, right.distinct);
        proptest::prop_assert_eq!(left.total, right.total);
    }

    #[test]
    fn prop_merge_is_commutative_on_distinct_and_total(
        a in proptest::collection::vec("[a-c]", 0..5),
        b in proptest::collection::vec("[a-c]", 0..5),
    ) {
        let (bag_a, bag_b) = (bag_from(&a), bag_from(&b));

        let mut a_then_b = bag_a.clone();
        a_then_b.merge(&bag_b);
        let mut b_then_a = bag_b.clone();
        b_then_a.merge(&bag_a);

        proptest::prop_assert_eq!(a_then_b.distinct, b_then_a.distinct);
        proptest::prop_assert_eq!(a_then_b.total, b_then_a.total);
    }

    #[test]
    fn prop_distinct_never_exceeds_total(ids in proptest::collection::vec("[a-f]", 0..16)) {
        let bag = bag_from(&ids);
        proptest::prop_assert!(bag.distinct <= bag.total);
        proptest::prop_assert_eq!(bag.total as usize, ids.len());
    }
}
