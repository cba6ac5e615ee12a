//! Field-level checks that fail with the stringified expression instead of
//! panicking, so a failed check flows through `step` like any other error.

/// Return `HarnessError::Assertion` from the enclosing function when `cond`
/// is false. An optional format message is attached as detail.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::HarnessError::Assertion {
                expression: stringify!($cond).to_string(),
                detail: None,
            });
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::HarnessError::Assertion {
                expression: stringify!($cond).to_string(),
                detail: Some(format!($($arg)+)),
            });
        }
    };
}

/// Like `check!(left == right)` but reports both values.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::HarnessError::Assertion {
                        expression: concat!(stringify!($left), " == ", stringify!($right)).to_string(),
                        detail: Some(format!("left: {:?}, right: {:?}", left, right)),
                    });
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::HarnessError;

    fn non_empty(title: &str) -> Result<(), HarnessError> {
        check!(!title.is_empty());
        Ok(())
    }

    fn positive(n: i32) -> Result<(), HarnessError> {
        check!(n > 0, "got {n}");
        Ok(())
    }

    fn same_id(actual: Option<u32>, expected: u32) -> Result<(), HarnessError> {
        check_eq!(actual, Some(expected));
        Ok(())
    }

    #[test]
    fn check_passes_and_fails() {
        assert!(non_empty("title").is_ok());
        match non_empty("").unwrap_err() {
            HarnessError::Assertion { expression, detail } => {
                assert_eq!(expression, "!title.is_empty()");
                assert!(detail.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn check_with_message() {
        let err = positive(-2).unwrap_err();
        assert!(matches!(err, HarnessError::Assertion { detail: Some(ref d), .. } if d == "got -2"));
    }

    #[test]
    fn check_eq_reports_both_sides() {
        assert!(same_id(Some(3), 3).is_ok());
        match same_id(Some(4), 3).unwrap_err() {
            HarnessError::Assertion { expression, detail } => {
                assert_eq!(expression, "actual == Some(expected)");
                assert_eq!(detail.as_deref(), Some("left: Some(4), right: Some(3)"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
