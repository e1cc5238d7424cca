// ABOUTME: Value types representing Lispy data structures and expressions

use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// A built-in operator, identified by name and the function implementing it.
///
/// Two builtins are equal (per spec's `==`/`!=`) iff they are the same
/// function, and `fn` pointers already give us that comparison for free.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

pub type BuiltinFn = fn(&Rc<Environment>, Vec<Value>) -> Result<Value, crate::error::EvalError>;

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.func as *const (), other.func as *const ())
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A user-defined function: remaining formal parameters (may still
/// contain the `&` variadic sentinel), the body to evaluate once fully
/// applied, and the frame capturing bindings made so far (by partial
/// application) whose parent is the environment the lambda was defined
/// in. See DESIGN.md for why the parent is fixed at construction time.
#[derive(Clone)]
pub struct Lambda {
    pub formals: Vec<String>,
    pub body: Box<Value>,
    pub env: Rc<Environment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    Builtin(Builtin),
    Lambda(Lambda),
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lambda(formals={:?})", self.formals)
    }
}

impl PartialEq for Lambda {
    /// Structural equality on formals and body only; environments are
    /// never compared (spec 4.3.3).
    fn eq(&self, other: &Self) -> bool {
        self.formals == other.formals && self.body == other.body
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(i64),
    Error(String),
    Symbol(String),
    Str(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Function(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Error(_) => "Error",
            Value::Symbol(_) => "Symbol",
            Value::Str(_) => "String",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Function(_) => "Function",
        }
    }

    pub fn builtin(name: &'static str, func: BuiltinFn) -> Value {
        Value::Function(Function::Builtin(Builtin { name, func }))
    }

    pub fn empty_sexpr() -> Value {
        Value::SExpr(Vec::new())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Error(msg) => write!(f, "{msg}"),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "{}", escape_string(s)),
            Value::SExpr(items) => write_seq(f, items, '(', ')'),
            Value::QExpr(items) => write_seq(f, items, '{', '}'),
            Value::Function(Function::Builtin(_)) => write!(f, "<function>"),
            Value::Function(Function::Lambda(lambda)) => {
                write!(f, "(\\ {{")?;
                for (i, p) in lambda.formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, "}} {})", lambda.body)
            }
        }
    }
}
