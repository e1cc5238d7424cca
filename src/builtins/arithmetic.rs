//! Arithmetic operations: +, -, *, /, %
//!
//! Numeric folds over `Value::Number`. All but `-` need at least one
//! argument; `-` with a single argument negates it instead of folding.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn expect_number(function: &str, position: usize, v: &Value) -> Result<i64, EvalError> {
    match v {
        Value::Number(n) => Ok(*n),
        other => Err(EvalError::type_error(function, "Number", other.type_name(), position)),
    }
}

fn numbers(function: &str, args: &[Value]) -> Result<Vec<i64>, EvalError> {
    if args.is_empty() {
        return Err(EvalError::TooFewArguments {
            function: function.to_string(),
            expected: 1,
            actual: 0,
        });
    }
    args.iter()
        .enumerate()
        .map(|(i, v)| expect_number(function, i, v))
        .collect()
}

/// `(+ 1 2 3)` => `6`. `(+ 10)` => `10`.
pub fn builtin_add(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let ns = numbers("+", &args)?;
    Ok(Value::Number(ns.into_iter().sum()))
}

/// `(- 10 3 2)` => `5`. A single argument negates: `(- 5)` => `-5`.
pub fn builtin_sub(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let ns = numbers("-", &args)?;
    if ns.len() == 1 {
        return Ok(Value::Number(-ns[0]));
    }
    Ok(Value::Number(ns[1..].iter().fold(ns[0], |acc, n| acc - n)))
}

/// `(* 2 3 4)` => `24`.
pub fn builtin_mul(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let ns = numbers("*", &args)?;
    Ok(Value::Number(ns.into_iter().product()))
}

/// `(/ 20 4)` => `5`. Dividing by zero anywhere in the fold yields an
/// error value rather than panicking (spec 4.3, division by zero).
pub fn builtin_div(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    let ns = numbers("/", &args)?;
    if ns.len() == 1 {
        if ns[0] == 0 {
            return Err(EvalError::DivisionByZero);
        }
        return Ok(Value::Number(1 / ns[0]));
    }
    let mut acc = ns[0];
    for n in &ns[1..] {
        if *n == 0 {
            return Err(EvalError::DivisionByZero);
        }
        acc /= n;
    }
    Ok(Value::Number(acc))
}

/// `(% 17 5)` => `2`. Exactly two arguments.
pub fn builtin_mod(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::TooFewArguments {
            function: "%".to_string(),
            expected: 2,
            actual: args.len(),
        });
    }
    let a = expect_number("%", 0, &args[0])?;
    let b = expect_number("%", 1, &args[1])?;
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Value::Number(a % b))
}

pub fn register(env: &Rc<Environment>) {
    env.put("+".to_string(), Value::builtin("+", builtin_add));
    env.put("-".to_string(), Value::builtin("-", builtin_sub));
    env.put("*".to_string(), Value::builtin("*", builtin_mul));
    env.put("/".to_string(), Value::builtin("/", builtin_div));
    env.put("%".to_string(), Value::builtin("%", builtin_mod));
}
