use mouse::lang::Log;
use mouse::mach::{Stack, Val};
use proptest::prelude::*;

fn stack_from(vals: &[i64]) -> Stack {
    let mut s = Stack::new(Log {
        silent: true,
        ..Log::default()
    });
    for &n in vals {
        s.push(Val::Integer(n)).unwrap();
    }
    s
}

fn snapshot(s: &Stack) -> Vec<Val> {
    s.items().to_vec()
}

proptest! {
    /// swap is its own inverse on any 2+-deep stack.
    #[test]
    fn prop_swap_twice_is_identity(vals in prop::collection::vec(any::<i64>(), 2..32)) {
        let mut s = stack_from(&vals);
        let before = snapshot(&s);
        s.swap().unwrap();
        s.swap().unwrap();
        prop_assert_eq!(snapshot(&s), before);
    }

    /// swap preserves stack length.
    #[test]
    fn prop_swap_preserves_length(vals in prop::collection::vec(any::<i64>(), 2..32)) {
        let mut s = stack_from(&vals);
        let len = s.len();
        s.swap().unwrap();
        prop_assert_eq!(s.len(), len);
    }

    /// rot then urot restores the original order on any 3+-deep stack.
    #[test]
    fn prop_rot_urot_restore_order(vals in prop::collection::vec(any::<i64>(), 3..32)) {
        let mut s = stack_from(&vals);
        let before = snapshot(&s);
        s.rot().unwrap();
        s.urot().unwrap();
        prop_assert_eq!(snapshot(&s), before);
    }

    /// urot then rot restores the original order too.
    #[test]
    fn prop_urot_rot_restore_order(vals in prop::collection::vec(any::<i64>(), 3..32)) {
        let mut s = stack_from(&vals);
        let before = snapshot(&s);
        s.urot().unwrap();
        s.rot().unwrap();
        prop_assert_eq!(snapshot(&s), before);
    }

    /// dup adds exactly one element, a copy of the top.
    #[test]
    fn prop_dup_grows_by_one(vals in prop::collection::vec(any::<i64>(), 1..32)) {
        let mut s = stack_from(&vals);
        let len = s.len();
        let top = s.copy().unwrap();
        s.dup().unwrap();
        prop_assert_eq!(s.len(), len + 1);
        prop_assert_eq!(s.copy().unwrap(), top);
    }

    /// popping n values returns them in exact reverse push order.
    #[test]
    fn prop_pop_n_reverses_push_order(vals in prop::collection::vec(any::<i64>(), 0..32)) {
        let mut s = stack_from(&vals);
        let popped = s.pop_n(vals.len()).unwrap();
        let expected: Vec<Val> = vals.iter().rev().map(|&n| Val::Integer(n)).collect();
        prop_assert_eq!(popped, expected);
        prop_assert!(s.is_empty());
    }

    /// push a; push b; add leaves exactly a + b.
    #[test]
    fn prop_add_law(a in any::<i32>(), b in any::<i32>()) {
        let mut s = stack_from(&[a as i64, b as i64]);
        s.add().unwrap();
        prop_assert_eq!(s.pop().unwrap(), Val::Integer(a as i64 + b as i64));
        prop_assert!(s.is_empty());
    }

    /// sub computes second-popped minus first-popped.
    #[test]
    fn prop_sub_law(a in any::<i32>(), b in any::<i32>()) {
        let mut s = stack_from(&[a as i64, b as i64]);
        s.sub().unwrap();
        prop_assert_eq!(s.pop().unwrap(), Val::Integer(a as i64 - b as i64));
        prop_assert!(s.is_empty());
    }

    /// mul law under the same operand order.
    #[test]
    fn prop_mul_law(a in -46340i64..46340, b in -46340i64..46340) {
        let mut s = stack_from(&[a, b]);
        s.mlt().unwrap();
        prop_assert_eq!(s.pop().unwrap(), Val::Integer(a * b));
        prop_assert!(s.is_empty());
    }
}
