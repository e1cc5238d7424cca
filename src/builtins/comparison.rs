//! Comparison operations: ==, !=, <, >, <=, >=
//!
//! There is no separate boolean type (spec's GLOSSARY note: truthiness is
//! just `Number`, 0 for false and any nonzero for true, matching the
//! reader's own treatment of literals). `==`/`!=` work structurally over
//! any `Value`; the ordering operators require exactly two `Number`s.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn bool_value(b: bool) -> Value {
    Value::Number(if b { 1 } else { 0 })
}

fn expect_number(function: &str, position: usize, v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "Number", other.type_name(), position)),
    }
}

fn numeric_pair(function: &str, args: &[Value]) -> Result<(i64, i64), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: function.to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    Ok((
        expect_number(function, 0, &args[0])?,
        expect_number(function, 1, &args[1])?,
    ))
}

/// `(== 5 5)` => `1`. Works on any pair of values, not just numbers.
pub fn builtin_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: "==".to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    Ok(bool_value(args[0] == args[1]))
}

/// `(!= 5 6)` => `1`.
pub fn builtin_ne(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: "!=".to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    Ok(bool_value(args[0] != args[1]))
}

pub fn builtin_lt(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let (a, b) = numeric_pair("<", &args)?;
    Ok(bool_value(a < b))
}

pub fn builtin_gt(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let (a, b) = numeric_pair(">", &args)?;
    Ok(bool_value(a > b))
}

pub fn builtin_le(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let (a, b) = numeric_pair("<=", &args)?;
    Ok(bool_value(a <= b))
}

pub fn builtin_ge(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let (a, b) = numeric_pair(">=", &args)?;
    Ok(bool_value(a >= b))
}

pub fn register(env: &Rc<Environment>) {
    env.put("==".to_string(), Value::builtin("==", builtin_eq));
    env.put("!=".to_string(), Value::builtin("!=", builtin_ne));
    env.put("<".to_string(), Value::builtin("<", builtin_lt));
    env.put(">".to_string(), Value::builtin(">", builtin_gt));
    env.put("<=".to_string(), Value::builtin("<=", builtin_le));
    env.put(">=".to_string(), Value::builtin(">=", builtin_ge));
}
