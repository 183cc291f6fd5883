#[macro_export]
/// Generates a String similar to output of `dbg` but without printing
macro_rules! format_dbg {
    ($dbg_expr:expr) => {
        format!(
            "[{}:{}] {}: {:?}",
            file!(),
            line!(),
            stringify!($dbg_expr),
            $dbg_expr
        )
    };
    () => {
        format!("[{}:{}]", file!(), line!())
    };
}

#[macro_export]
/// Asserts that two `f64` expressions are equal within the relative/absolute
/// tolerance of [`almost_eq`](crate::utils::almost_eq), printing both on failure.
macro_rules! assert_almost_eq {
    (@eps $left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            $crate::utils::almost_eq(left, right, $epsilon),
            "{}\n{}",
            $crate::format_dbg!(left),
            $crate::format_dbg!(right)
        );
    }};
    ($left:expr, $right:expr) => {
        $crate::assert_almost_eq!(@eps $left, $right, None)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {
        $crate::assert_almost_eq!(@eps $left, $right, Some($epsilon))
    };
}
