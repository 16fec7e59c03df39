/// A ternary expression handler.  Rust's `if` is already an
/// expression, but `cargo fmt` insists on breaking it across lines,
/// and the border-handling tables in the energy and seam code read
/// much better as single-line three-column rules.
#[macro_export]
macro_rules! tern {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
