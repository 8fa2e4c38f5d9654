/// Test whether the actual (request) value matches at least one of the condition values.
/// The comparison function F will be invoked as F(condv, actual)
pub fn any_match<T, A, F>(cond_values: &[T], actual: &A, cmp: F) -> bool
where
    F: Fn(&T, &A) -> bool,
    A: ?Sized,
{
    cond_values.iter().any(|condv| cmp(condv, actual))
}

/// Test whether the actual (request) value matches none of the condition values. This is the
/// negation of [`any_match`] over the whole list, not a per-value negation: with more than one
/// condition value every one of them has to fail to match.
/// The comparison function F will be invoked as F(condv, actual)
pub fn none_match<T, A, F>(cond_values: &[T], actual: &A, cmp: F) -> bool
where
    F: Fn(&T, &A) -> bool,
    A: ?Sized,
{
    !any_match(cond_values, actual, cmp)
}
