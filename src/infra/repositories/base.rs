//! Query helpers shared by the repositories.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

/// Escape character used in LIKE patterns built by [`contains_ignore_case`].
const LIKE_ESCAPE: char = '\\';

/// Build a `LOWER(column) LIKE '%needle%'` condition.
///
/// LIKE wildcards in the needle are escaped so they match literally.
pub fn contains_ignore_case(column: impl IntoColumnRef, needle: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE))
}

fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
