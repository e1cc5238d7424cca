// ABOUTME: Evaluator: reduces a `Value` tree to its normal form
//
// There is no special-form dispatch here. `def`, `\`, `if`, `==`, and
// friends are ordinary built-in functions registered in the root
// environment (see builtins/); what makes `(def {x} 100)` work without a
// macro layer is that Q-expressions are self-evaluating (spec 4.2.1), so
// `{x}` simply evaluates to itself and arrives at the `def` builtin
// unevaluated-looking, with no special case required in `eval_sexpr`.
//
// `eval` itself is infallible: there is no separate error channel inside
// the language (spec 7), so any `EvalError` raised along the way is
// folded into a `Value::Error` before it escapes this module. Built-ins
// and `apply` still thread `Result<Value, EvalError>` internally, purely
// so their implementations can use `?` like ordinary Rust code; the fold
// happens once, here, at the seam between that internal plumbing and the
// value-level propagation spec.md describes.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Function, Lambda, Value};
use std::rc::Rc;
use tracing::{debug, trace};

/// Reduces `value` to its normal form in `env` (spec 4.2.1).
pub fn eval(env: &Rc<Environment>, value: Value) -> Value {
    match value {
        Value::Symbol(name) => match env.get(&name) {
            Some(v) => v,
            None => {
                debug!(symbol = %name, "unbound symbol");
                Value::Error(EvalError::UnboundSymbol(name).to_string())
            }
        },
        Value::SExpr(items) => eval_sexpr(env, items),
        // Numbers, strings, errors, Q-expressions, and functions are
        // already in normal form.
        other => other,
    }
}

/// Evaluates every child in order *before* checking any of them for an
/// error (spec 4.2.2 and the design note in spec 9: siblings after a
/// failing one are still evaluated for their side effects, e.g. a `def`
/// later in the same S-expression still runs). Only once every child has
/// been reduced do we scan for the first error among them. An empty
/// S-expression evaluates to itself; a single-element one reduces to its
/// (already-evaluated) element; otherwise the first element must
/// evaluate to a function, which is then applied to the rest.
fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Value {
    let mut evaluated: Vec<Value> = items.into_iter().map(|item| eval(env, item)).collect();

    if let Some(pos) = evaluated.iter().position(Value::is_error) {
        return evaluated.swap_remove(pos);
    }

    if evaluated.is_empty() {
        return Value::empty_sexpr();
    }
    if evaluated.len() == 1 {
        return evaluated.into_iter().next().unwrap();
    }

    let mut iter = evaluated.into_iter();
    let head = iter.next().unwrap();
    let args: Vec<Value> = iter.collect();

    let result = match head {
        Value::Function(f) => apply(env, f, args),
        _ => Err(EvalError::NotAFunction),
    };

    match result {
        Ok(v) => v,
        Err(e) => Value::Error(e.to_string()),
    }
}

/// Applies a function to already-evaluated arguments (spec 4.2.3).
/// Built-ins run directly against the caller's environment; lambdas bind
/// formals one at a time into a fresh frame parented on the lambda's
/// captured environment, supporting both partial application/currying
/// and the `&` variadic marker. See DESIGN.md for why the parent of that
/// frame is fixed at construction time rather than reparented per call.
pub fn apply(env: &Rc<Environment>, function: Function, args: Vec<Value>) -> Result<Value, EvalError> {
    match function {
        Function::Builtin(b) => {
            trace!(name = b.name, arg_count = args.len(), "calling builtin");
            (b.func)(env, args)
        }
        Function::Lambda(lambda) => {
            trace!(arg_count = args.len(), formals = ?lambda.formals, "calling lambda");
            apply_lambda(lambda, args)
        }
    }
}

fn apply_lambda(lambda: Lambda, args: Vec<Value>) -> Result<Value, EvalError> {
    let total_formals = lambda.formals.len();
    let total_args = args.len();

    let call_frame = Environment::child(&lambda.env);
    let mut formals = lambda.formals;
    let mut args = args.into_iter();
    let mut fully_bound = false;

    loop {
        if formals.is_empty() {
            fully_bound = true;
            break;
        }
        let formal = formals.remove(0);

        if formal == "&" {
            if formals.len() != 1 {
                return Err(EvalError::MalformedVariadic);
            }
            let varname = formals.remove(0);
            let rest: Vec<Value> = args.by_ref().collect();
            call_frame.put(varname, Value::QExpr(rest));
            fully_bound = true;
            break;
        }

        match args.next() {
            Some(val) => call_frame.put(formal, val),
            None => {
                // Not enough arguments yet: this is a partial
                // application. Put the formal back and hand back a new
                // lambda that remembers what's bound so far.
                formals.insert(0, formal);
                break;
            }
        }
    }

    if args.next().is_some() {
        return Err(EvalError::TooManyArguments {
            function: "\\".to_string(),
            expected: total_formals,
            actual: total_args,
        });
    }

    if fully_bound {
        Ok(eval(&call_frame, (*lambda.body).clone()))
    } else {
        Ok(Value::Function(Function::Lambda(Lambda {
            formals,
            body: lambda.body,
            env: call_frame,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins;
    use crate::parser::parse_one;

    fn run(source: &str) -> Value {
        let root = Environment::new_root();
        builtins::register_all(&root);
        let expr = parse_one(source).unwrap();
        eval(&root, expr)
    }

    #[test]
    fn self_evaluating_literals() {
        assert_eq!(run("42"), Value::Number(42));
        assert_eq!(run("\"hi\""), Value::Str("hi".to_string()));
        assert_eq!(run("{1 2}"), Value::QExpr(vec![Value::Number(1), Value::Number(2)]));
    }

    #[test]
    fn empty_sexpr_evaluates_to_itself() {
        assert_eq!(run("()"), Value::empty_sexpr());
    }

    #[test]
    fn unbound_symbol_errors() {
        assert_eq!(run("nope"), Value::Error("Unbound symbol 'nope'!".to_string()));
    }

    #[test]
    fn arithmetic_left_fold() {
        assert_eq!(run("(+ 1 2 3)"), Value::Number(6));
        assert_eq!(run("(- 10 1 2)"), Value::Number(7));
        assert_eq!(run("(* 2 3 4)"), Value::Number(24));
        assert_eq!(run("(- 5)"), Value::Number(-5));
    }

    #[test]
    fn division_by_zero_is_an_error_value() {
        assert_eq!(run("(/ 1 0)"), Value::Error("Division by zero!".to_string()));
    }

    #[test]
    fn error_short_circuits_sexpr_evaluation() {
        assert_eq!(run("(+ 1 (/ 1 0) (head {}))"), Value::Error("Division by zero!".to_string()));
    }

    #[test]
    fn error_in_an_earlier_sibling_does_not_skip_evaluating_later_ones() {
        // Per spec 9's design note: every child is evaluated before the
        // first error is reported, so a `def` after a failing sibling
        // still takes effect even though the S-expression as a whole
        // reduces to the earlier error.
        let root = Environment::new_root();
        builtins::register_all(&root);
        let expr = parse_one("(list (/ 1 0) (def {x} 99))").unwrap();
        assert_eq!(eval(&root, expr), Value::Error("Division by zero!".to_string()));
        assert_eq!(eval(&root, parse_one("x").unwrap()), Value::Number(99));
    }

    #[test]
    fn def_and_lookup() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        eval(&root, parse_one("(def {x} 100)").unwrap());
        assert_eq!(eval(&root, parse_one("x").unwrap()), Value::Number(100));
    }

    #[test]
    fn lambda_application() {
        assert_eq!(run("((\\ {x y} {+ x y}) 3 4)"), Value::Number(7));
    }

    #[test]
    fn partial_application_and_currying() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        eval(&root, parse_one("(def {add} (\\ {x y} {+ x y}))").unwrap());
        let partial = eval(&root, parse_one("(add 1)").unwrap());
        assert!(matches!(partial, Value::Function(Function::Lambda(_))));
        eval(&root, parse_one("(def {add1} (add 1))").unwrap());
        assert_eq!(eval(&root, parse_one("(add1 9)").unwrap()), Value::Number(10));
    }

    #[test]
    fn variadic_parameters_collect_into_a_qexpr() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        eval(&root, parse_one("(def {args} (\\ {x & xs} {xs}))").unwrap());
        assert_eq!(
            eval(&root, parse_one("(args 1 2 3)").unwrap()),
            Value::QExpr(vec![Value::Number(2), Value::Number(3)])
        );
    }

    #[test]
    fn closure_captures_defining_environment() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        eval(&root, parse_one("(def {y} 10)").unwrap());
        eval(&root, parse_one("(def {f} (\\ {x} {+ x y}))").unwrap());
        assert_eq!(eval(&root, parse_one("(f 1)").unwrap()), Value::Number(11));

        // Rebinding y afterward is visible to f because it looks y up by
        // walking to the root each call, not by having copied its value.
        eval(&root, parse_one("(def {y} 20)").unwrap());
        assert_eq!(eval(&root, parse_one("(f 1)").unwrap()), Value::Number(21));
    }

    #[test]
    fn too_many_arguments_to_a_lambda_is_an_error() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        match eval(&root, parse_one("((\\ {x} {x}) 1 2)").unwrap()) {
            Value::Error(msg) => assert!(msg.contains("too many arguments")),
            other => panic!("expected an error value, got {other:?}"),
        }
    }

    #[test]
    fn sexpr_not_starting_with_a_function_errors() {
        let root = Environment::new_root();
        builtins::register_all(&root);
        assert_eq!(
            eval(&root, parse_one("(1 2 3)").unwrap()),
            Value::Error("S-expression does not start with function".to_string())
        );
    }

    #[test]
    fn if_chooses_a_branch() {
        assert_eq!(run("(if (== 1 1) {1} {2})"), Value::Number(1));
        assert_eq!(run("(if (== 1 2) {1} {2})"), Value::Number(2));
    }
}
