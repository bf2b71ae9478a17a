/// Source positions.
///
/// Every token, AST node and positioned error carries a [`Position`]
/// (1-based line and column) so diagnostics can point back into the source
/// text.
pub mod position;
