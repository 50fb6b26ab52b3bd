use crate::deps::Dep;

/// Shallow, positional comparison of two resolved dependency values.
///
/// True when both are the same value, or both are lists of equal length whose
/// elements are pairwise [`Dep::same`]. Elements are never compared deeply.
pub fn shallow_equal(next: &Dep, prev: &Dep) -> bool {
    if next.same(prev) {
        return true;
    }
    match (next.as_list(), prev.as_list()) {
        (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same(y)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn reflexive_for_same_list() {
        let list = Dep::list([Dep::object(()), Dep::from(f64::NAN)]);
        assert!(shallow_equal(&list, &list.clone()));
    }

    #[test]
    fn equal_elements_by_identity() {
        let shared = Rc::new(vec![1, 2, 3]);
        let a = Dep::list([Dep::from(1), Dep::from("k"), Dep::from(shared.clone())]);
        let b = Dep::list([Dep::from(1), Dep::from("k"), Dep::from(shared)]);
        assert!(shallow_equal(&a, &b));
    }

    #[test]
    fn length_mismatch() {
        assert!(!shallow_equal(&Dep::list([1, 2]), &Dep::list([1])));
        assert!(!shallow_equal(&Dep::list([1]), &Dep::list([1, 2])));
    }

    #[test]
    fn element_mismatch() {
        assert!(!shallow_equal(&Dep::list([1, 2]), &Dep::list([1, 3])));
        assert!(!shallow_equal(
            &Dep::list([Dep::object(vec![1])]),
            &Dep::list([Dep::object(vec![1])])
        ));
    }

    #[test]
    fn nested_lists_are_not_deep_compared() {
        let a = Dep::list([Dep::list([1])]);
        let b = Dep::list([Dep::list([1])]);
        assert!(!shallow_equal(&a, &b));
    }

    #[test]
    fn missing_previous_is_unequal() {
        assert!(!shallow_equal(&Dep::list([1]), &Dep::Undefined));
        assert!(shallow_equal(&Dep::list(Vec::<i32>::new()), &Dep::list(Vec::<i32>::new())));
    }
}
