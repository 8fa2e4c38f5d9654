/// Test whether the incoming string `s` matches the glob `pattern`.
///
/// A `*` in the pattern matches any run of characters (including none) and a `?` matches exactly
/// one character. Every other character, including regex metacharacters like `.` or `[`, only
/// matches itself. The whole of `s` has to be consumed; this is not a substring search.
///
/// e.g. `abc*xyz` matches `abcdefghijkxyz`, `ab?` matches `abc` but not `ab` or `abcd`
///
/// Matching is case sensitive. If no wildcard is present in the pattern the inputs must be an
/// exact match.
pub(crate) fn matches(pattern: &str, s: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = s.chars().collect();

    let mut p = 0;
    let mut i = 0;

    // pattern index of the most recent '*' and the input index it is currently absorbing up to
    let mut backtrack: Option<(usize, usize)> = None;

    while i < input.len() {
        match pattern.get(p) {
            Some(&'*') => {
                // let the '*' match nothing first, widen it on a later mismatch
                backtrack = Some((p, i));
                p += 1;
            }
            Some(&c) if c == '?' || c == input[i] => {
                p += 1;
                i += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    i = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }

    // input is exhausted, anything left in the pattern has to be able to match nothing
    pattern[p..].iter().all(|&c| c == '*')
}
