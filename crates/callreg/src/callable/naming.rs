/// Derive a registration name from a function's Rust type.
///
/// Function items yield their last path segment (`my_crate::math::sum` gives
/// `sum`). Closures have no name of their own and yield the full type path
/// (`my_crate::main::{{closure}}`). Function pointers have no name either and
/// yield their whole signature (`fn(i64) -> i64`). The result depends on the
/// compiler and is meant for debugging and lookup in tests, not as a stable
/// identifier.
pub fn derive_name<F: ?Sized>() -> String {
    let full = std::any::type_name::<F>();
    if full.contains("{{closure}}") {
        return full.to_string();
    }
    let path = full.split_once('<').map_or(full, |(path, _)| path);
    path.rsplit("::").next().unwrap_or(path).to_string()
}
