use mouse::lang::{ErrorCode, Log};
use mouse::mach::{Stack, Val};

fn stack() -> Stack {
    Stack::new(Log {
        silent: true,
        ..Log::default()
    })
}

fn push_ints(stack: &mut Stack, ns: &[i64]) {
    for &n in ns {
        stack.push(Val::Integer(n)).unwrap();
    }
}

fn ints(stack: &Stack) -> Vec<i64> {
    stack
        .items()
        .iter()
        .map(|v| match v {
            Val::Integer(n) => *n,
            other => panic!("expected an int, found {:?}", other),
        })
        .collect()
}

#[test]
fn test_push_pop() {
    let mut s = stack();
    s.push(Val::Integer(9)).unwrap();
    assert_eq!(ints(&s), vec![9]);
    assert_eq!(s.pop().unwrap(), Val::Integer(9));
    assert!(s.is_empty());
}

#[test]
fn test_pop_underflow() {
    let mut s = stack();
    let error = s.pop().unwrap_err();
    assert_eq!(error.code(), ErrorCode::StackUnderflow);
}

#[test]
fn test_pop_n_lifo_order() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4]);
    let vals = s.pop_n(3).unwrap();
    assert_eq!(
        vals,
        vec![Val::Integer(4), Val::Integer(3), Val::Integer(2)]
    );
    assert_eq!(ints(&s), vec![1]);
}

#[test]
fn test_pop_n_is_atomic() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    let error = s.pop_n(3).unwrap_err();
    assert_eq!(error.code(), ErrorCode::StackUnderflow);
    assert_eq!(ints(&s), vec![1, 2]);
}

#[test]
fn test_pop_2_is_atomic() {
    let mut s = stack();
    push_ints(&mut s, &[7]);
    assert!(s.pop_2().is_err());
    assert_eq!(ints(&s), vec![7]);
}

#[test]
fn test_pop_or_empty() {
    let mut s = stack();
    assert_eq!(s.pop_or_empty(), Val::Empty);
    s.push(Val::Integer(1)).unwrap();
    assert_eq!(s.pop_or_empty(), Val::Integer(1));
}

#[test]
fn test_copy() {
    let mut s = stack();
    s.push(Val::Integer(9)).unwrap();
    assert_eq!(s.copy().unwrap(), Val::Integer(9));
    assert_eq!(ints(&s), vec![9]);
}

#[test]
fn test_copy_fail() {
    let s = stack();
    assert_eq!(s.copy().unwrap_err().code(), ErrorCode::StackUnderflow);
}

#[test]
fn test_copy_n_keeps_order() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3]);
    let vals = s.copy_n(2).unwrap();
    assert_eq!(vals, vec![Val::Integer(2), Val::Integer(3)]);
    assert_eq!(ints(&s), vec![1, 2, 3]);
}

#[test]
fn test_insert() {
    let mut s = stack();
    push_ints(&mut s, &[0, 1, 2, 3]);
    s.insert(Val::Integer(5), 2).unwrap();
    assert_eq!(ints(&s), vec![0, 1, 5, 2, 3]);
}

#[test]
fn test_insert_negative_counts_from_top() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    s.insert(Val::Integer(9), -1).unwrap();
    assert_eq!(ints(&s), vec![1, 9, 2]);
}

#[test]
fn test_insert_bad_index_is_internal() {
    let mut s = stack();
    let error = s.insert(Val::Integer(9), 9).unwrap_err();
    assert_eq!(error.code(), ErrorCode::BadIndex);
}

#[test]
fn test_insert_n() {
    let mut s = stack();
    push_ints(&mut s, &[0, 1, 2, 3]);
    s.insert_n(vec![Val::Integer(8), Val::Integer(9)], 2).unwrap();
    assert_eq!(ints(&s), vec![0, 1, 8, 9, 2, 3]);
}

#[test]
fn test_remove() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3]);
    assert_eq!(s.remove(1).unwrap(), Val::Integer(2));
    assert_eq!(ints(&s), vec![1, 3]);
}

#[test]
fn test_remove_bad_index_is_internal() {
    let mut s = stack();
    assert_eq!(s.remove(1).unwrap_err().code(), ErrorCode::BadIndex);
}

#[test]
fn test_index_counts_from_top() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3]);
    assert_eq!(s.index(1).unwrap(), Val::Integer(3));
    assert_eq!(s.index(3).unwrap(), Val::Integer(1));
    assert!(s.index(4).is_err());
}

#[test]
fn test_clean_returns_old_stack() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    let old = s.clean();
    assert_eq!(old, vec![Val::Integer(1), Val::Integer(2)]);
    assert!(s.is_empty());
}

#[test]
fn test_trade_swaps_whole_stacks() {
    let mut a = stack();
    let mut b = stack();
    push_ints(&mut a, &[1, 2]);
    push_ints(&mut b, &[9]);
    a.trade(&mut b);
    assert_eq!(ints(&a), vec![9]);
    assert_eq!(ints(&b), vec![1, 2]);
}

// the shuffle words

#[test]
fn test_dup() {
    let mut s = stack();
    push_ints(&mut s, &[1]);
    s.dup().unwrap();
    assert_eq!(ints(&s), vec![1, 1]);
}

#[test]
fn test_dup_n() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4]);
    s.dup_n(4).unwrap();
    assert_eq!(ints(&s), vec![1, 2, 3, 4, 1, 2, 3, 4]);
}

#[test]
fn test_swap_twice_is_identity() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    s.swap().unwrap();
    assert_eq!(ints(&s), vec![2, 1]);
    s.swap().unwrap();
    assert_eq!(ints(&s), vec![1, 2]);
}

#[test]
fn test_rot() {
    let mut s = stack();
    push_ints(&mut s, &[0, 1, 2, 3]);
    s.rot().unwrap();
    assert_eq!(ints(&s), vec![0, 3, 1, 2]);
}

#[test]
fn test_urot() {
    let mut s = stack();
    push_ints(&mut s, &[0, 1, 2, 3]);
    s.urot().unwrap();
    assert_eq!(ints(&s), vec![0, 2, 3, 1]);
}

#[test]
fn test_rot_and_urot_are_inverses() {
    let mut s = stack();
    push_ints(&mut s, &[0, 1, 2, 3]);
    s.rot().unwrap();
    s.urot().unwrap();
    assert_eq!(ints(&s), vec![0, 1, 2, 3]);
}

#[test]
fn test_rot_needs_three() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    assert_eq!(s.rot().unwrap_err().code(), ErrorCode::StackUnderflow);
    assert_eq!(ints(&s), vec![1, 2]);
}

#[test]
fn test_roll() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4]);
    s.roll().unwrap();
    assert_eq!(ints(&s), vec![2, 3, 4, 1]);
}

#[test]
fn test_roll_n() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    s.roll_n(5).unwrap();
    assert_eq!(ints(&s), vec![6, 7, 8, 9, 1, 2, 3, 4, 5]);
}

#[test]
fn test_uroll() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4, 5]);
    s.uroll().unwrap();
    assert_eq!(ints(&s), vec![5, 1, 2, 3, 4]);
}

#[test]
fn test_uroll_n() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    s.uroll_n(5).unwrap();
    assert_eq!(ints(&s), vec![5, 6, 7, 8, 9, 1, 2, 3, 4]);
}

#[test]
fn test_drop() {
    let mut s = stack();
    push_ints(&mut s, &[0]);
    s.drop().unwrap();
    assert!(s.is_empty());
}

#[test]
fn test_drop_n() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3, 4, 5, 6, 7, 8]);
    s.drop_n(8).unwrap();
    assert!(s.is_empty());
}

#[test]
fn test_over() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2, 3]);
    s.over().unwrap();
    assert_eq!(ints(&s), vec![1, 2, 3, 2]);
}

#[test]
fn test_nip() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    s.nip().unwrap();
    assert_eq!(ints(&s), vec![2]);
}

#[test]
fn test_tuck() {
    let mut s = stack();
    push_ints(&mut s, &[1, 2]);
    s.tuck().unwrap();
    assert_eq!(ints(&s), vec![2, 1, 2]);
}
