// ABOUTME: Error types for reading and evaluating Lispy source

use thiserror::Error;

/// Failures from the reader: the parser rejected the text outright
/// (unbalanced brackets, stray characters). A numeric literal overflowing
/// `i64` is not one of these; it surfaces as `Value::Error("invalid
/// number")` directly out of parser.rs, since spec 4.1 treats it as a
/// value-level error rather than a structural read failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    #[error("Parse error: {0}")]
    Syntax(String),
}

/// Evaluation failures. These only ever surface to the user wrapped in a
/// `Value::Error`; there is no separate error channel inside the
/// language (spec 7), but the evaluator itself threads them as a `Result`
/// so built-ins can bail out with `?` the way ordinary Rust code does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unbound symbol '{0}'!")]
    UnboundSymbol(String),

    #[error(
        "Function '{function}' passed incorrect type for argument {position}. Got {actual}, Expected {expected}."
    )]
    TypeMismatch {
        function: String,
        expected: &'static str,
        actual: &'static str,
        position: usize,
    },

    #[error("Function '{function}' passed too many arguments. Got {actual}, Expected {expected}.")]
    TooManyArguments {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Function '{function}' passed too few arguments. Got {actual}, Expected {expected}.")]
    TooFewArguments {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Function '{0}' passed {{}}!")]
    EmptyList(String),

    #[error("Division by zero!")]
    DivisionByZero,

    #[error("S-expression does not start with function")]
    NotAFunction,

    #[error("Function format invalid. Symbol '&' not followed by single symbol")]
    MalformedVariadic,

    #[error(
        "Incorrect no. of arguments to function '{function}'. Symbols: {symbols}, Values: {values}."
    )]
    NameValueCountMismatch {
        function: String,
        symbols: usize,
        values: usize,
    },

    #[error("Function '{function}' passed invalid type for argument {position}. Got {actual}, Expected Symbol.")]
    ExpectedSymbol {
        function: String,
        actual: &'static str,
        position: usize,
    },
}

impl EvalError {
    pub fn type_error(
        function: &str,
        expected: &'static str,
        actual: &'static str,
        position: usize,
    ) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected,
            actual,
            position,
        }
    }
}
