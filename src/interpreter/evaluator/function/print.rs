use std::io::Write;

use crate::{
    ast::Type,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
    util::position::Position,
};

/// Formats `args` with the format string `format`.
///
/// Literal text is copied as is. Each verb consumes the next argument:
/// `%d` an `int`, `%c` a `char`, `%s` a `string`. `%%` produces a single
/// `%`.
///
/// # Errors
/// - `MissingFormatArgument` when a verb has no argument left.
/// - `FormatTypeMismatch` when an argument's type differs from its verb's.
/// - `UnknownFormatVerb` for `%` followed by anything else.
/// - `DanglingPercent` when the format ends with a lone `%`.
/// - `UnusedFormatArguments` when arguments remain after the format is done.
///
/// # Example
/// ```
/// use subc::{
///     interpreter::{evaluator::function::print::format, value::Value},
///     util::position::Position,
/// };
///
/// let text = format("%s is %d%%",
///                   &[Value::String("x".into()), Value::Int(50)],
///                   Position::new(1, 1)).unwrap();
/// assert_eq!(text, "x is 50%");
/// ```
pub fn format(format: &str, args: &[Value], position: Position) -> EvalResult<String> {
    let mut output = String::with_capacity(format.len());
    let mut remaining = args.iter();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        let verb = chars.next()
                        .ok_or(RuntimeError::DanglingPercent { position })?;
        let expected = match verb {
            '%' => {
                output.push('%');
                continue;
            },
            'd' => Type::Int,
            'c' => Type::Char,
            's' => Type::String,
            _ => return Err(RuntimeError::UnknownFormatVerb { verb, position }),
        };

        let arg = remaining.next()
                           .ok_or(RuntimeError::MissingFormatArgument { verb, position })?;
        if arg.ty() != expected {
            return Err(RuntimeError::FormatTypeMismatch { verb,
                                                          expected,
                                                          found: arg.ty(),
                                                          position });
        }
        output.push_str(&arg.to_string());
    }

    let count = remaining.len();
    if count > 0 {
        return Err(RuntimeError::UnusedFormatArguments { count, position });
    }

    Ok(output)
}

/// Writes formatted text to the output sink.
///
/// The first argument is the format string and the rest are substituted
/// into it (see [`format`]). The whole text is formatted before anything
/// is written, so a failing call produces no output.
///
/// # Parameters
/// - `args`: The format string followed by its arguments.
/// - `out`: Where the text goes.
/// - `position`: The call site, for error reporting.
///
/// # Returns
/// [`Value::Void`].
///
/// # Example
/// ```
/// use subc::{
///     interpreter::{evaluator::function::print::print, value::Value},
///     util::position::Position,
/// };
///
/// let mut out = Vec::new();
/// print(&[Value::String("%c%c\n".into()), Value::Char(b'o'), Value::Char(b'k')],
///       &mut out,
///       Position::new(1, 1)).unwrap();
///
/// assert_eq!(out, b"ok\n");
/// ```
pub fn print(args: &[Value], out: &mut dyn Write, position: Position) -> EvalResult<Value> {
    let Some((Value::String(fmt), rest)) = args.split_first() else {
        let found = args.first().map_or(Type::Void, Value::ty);
        return Err(RuntimeError::TypeError { details: format!("print expects a string format, found {found}"),
                                             position });
    };

    let text = format(fmt, rest, position)?;
    out.write_all(text.as_bytes())
       .map_err(|error| RuntimeError::Output { message: error.to_string(),
                                               position })?;

    Ok(Value::Void)
}
