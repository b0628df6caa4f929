use std::cmp::Ordering;

/// A total order over `R`, selected by the user from a closed set of keys.
pub trait Comparator<R> {
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

/// Sort in place, keeping the input order of records that compare equal.
///
/// `slice::sort_by` is a stable merge sort, which is what makes the
/// "relevance" comparator (always `Equal`) preserve insertion order.
pub fn sort_stable<R, C>(items: &mut [&R], comparator: &C)
where
    C: Comparator<R> + ?Sized,
{
    items.sort_by(|a, b| comparator.compare(a, b));
}

/// Compare optional floats, missing values ordered as `0.0`.
pub fn cmp_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))
}

/// Case-insensitive string order.
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ByLen;

    impl Comparator<String> for ByLen {
        fn compare(&self, a: &String, b: &String) -> Ordering {
            a.len().cmp(&b.len())
        }
    }

    #[test]
    fn test_sort_stable_keeps_ties_in_order() {
        let data: Vec<String> = ["bb", "a", "cc", "d", "ee"].iter().map(|s| s.to_string()).collect();
        let mut refs: Vec<&String> = data.iter().collect();
        sort_stable(&mut refs, &ByLen);
        let out: Vec<&str> = refs.iter().map(|s| s.as_str()).collect();
        assert_eq!(out, vec!["a", "d", "bb", "cc", "ee"]);
    }

    #[test]
    fn test_cmp_helpers() {
        assert_eq!(cmp_f64(None, Some(0.0)), Ordering::Equal);
        assert_eq!(cmp_f64(Some(1.5), Some(2.0)), Ordering::Less);
        assert_eq!(cmp_text("alpha", "Beta"), Ordering::Less);
    }
}
