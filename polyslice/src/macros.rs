/// Assert two values are fuzzy equal, optionally with an explicit epsilon.
///
/// Works with anything exposing `fuzzy_eq`/`fuzzy_eq_eps` taking the other value by copy (numbers
/// and vectors).
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
   eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Construct a polygon from a list of `(x, y)` tuples.
///
/// # Examples
///
/// ```
/// # use polyslice::polygon;
/// # use polyslice::core::math::Vector2;
/// let square = polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square[2], Vector2::new(10.0, 10.0));
/// assert_eq!(square.area(), 100.0);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut pg = $crate::polygon::Polygon::with_capacity(size);
            $(
                pg.add($x.0, $x.1);
            )*
            pg
        }
    };
}

/// Used by [polygon!] to count repetitions for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}
