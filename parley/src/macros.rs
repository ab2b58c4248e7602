/// Creates a single conversation [`Turn`](crate::Turn) from a role shorthand.
///
/// ```rust
/// use parley::{Role, turn};
///
/// let reply = turn!(assistant => "Done.");
/// assert_eq!(reply.role, Role::Assistant);
/// assert_eq!(reply.content, "Done.");
/// ```
#[macro_export]
macro_rules! turn {
    (user => $content:expr $(,)?) => {
        $crate::Turn::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Turn::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use user or assistant");
    };
}

/// Creates a `Vec<Turn>` from role/content pairs, oldest first.
///
/// ```rust
/// use parley::{Role, turns};
///
/// let history = turns![
///     user => "What is the capital of France?",
///     assistant => "Paris.",
/// ];
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history[1].role, Role::Assistant);
/// ```
#[macro_export]
macro_rules! turns {
    () => {
        Vec::<$crate::Turn>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::turn!($role => $content)),+]
    };
}
