/// A location in the source text.
///
/// Lines and columns are 1-based. Columns count bytes from the start of the
/// line, which matches characters for the ASCII sources the language accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The source line.
    pub line:   usize,
    /// The column within the line.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    ///
    /// ## Example
    /// ```
    /// use subc::util::position::Position;
    ///
    /// let position = Position::new(3, 7);
    /// assert_eq!(position.to_string(), "line 3, column 7");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
