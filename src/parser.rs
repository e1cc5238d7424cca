// ABOUTME: Concrete-syntax parser and reader: turns Lispy source text directly into `Value` trees
//
// This plays the role spec.md splits into a generic external parser plus a
// separate "reader" adapter (tagged parse-tree -> Value). Like the
// teacher's own parser.rs, we fuse the two: nom builds `Value` nodes
// directly instead of an intermediate tagged tree, since both live in the
// same crate and share no process boundary. Numeric overflow still
// surfaces the way spec 4.1 describes it: as a `Value::Error("invalid
// number")` node in the tree, not a parser-level rejection; only
// genuinely malformed syntax (unbalanced brackets, stray characters)
// becomes a `ReadError`.

use crate::error::ReadError;
use crate::value::Value;
use nom::{
    branch::alt,
    character::complete::{char, digit1, multispace1, none_of, one_of},
    combinator::{opt, recognize},
    multi::{many0, many1},
    IResult, Parser,
};

/// Skips whitespace and `;`-comments (to end of line).
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    let comment = |i: &str| -> IResult<&str, ()> {
        let (i, _) = char(';')(i)?;
        let (i, _) = nom::bytes::complete::take_while(|c| c != '\n' && c != '\r')(i)?;
        Ok((i, ()))
    };
    many0(alt((nom::combinator::value((), multispace1), comment)))
        .map(|_| ())
        .parse(input)
}

const SYMBOL_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_+-*/\\=<>!&";

fn parse_number(input: &str) -> IResult<&str, Value> {
    recognize((opt(char('-')), digit1))
        .map(|text: &str| match text.parse::<i64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Error("invalid number".to_string()),
        })
        .parse(input)
}

fn parse_symbol(input: &str) -> IResult<&str, Value> {
    recognize(many1(one_of(SYMBOL_CHARS)))
        .map(|s: &str| Value::Symbol(s.to_string()))
        .parse(input)
}

/// Strings recognize the escapes spec 4.1 names (`\n \t \r \" \\`); any
/// other escaped character is kept literally, backslash and all.
fn parse_string(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('"')(input)?;
    let mut result = String::new();
    let mut rest = input;
    loop {
        if let Ok((r, _)) = char::<_, nom::error::Error<&str>>('"')(rest) {
            return Ok((r, Value::Str(result)));
        }
        if let Ok((r, _)) = char::<_, nom::error::Error<&str>>('\\')(rest) {
            let (r, escaped) = nom::character::complete::anychar(r)?;
            match escaped {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                '"' => result.push('"'),
                '\\' => result.push('\\'),
                other => {
                    result.push('\\');
                    result.push(other);
                }
            }
            rest = r;
            continue;
        }
        match none_of::<_, _, nom::error::Error<&str>>("\"")(rest) {
            Ok((r, c)) => {
                result.push(c);
                rest = r;
            }
            Err(_) => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    rest,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

fn parse_sexpr(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let (input, _) = ws_and_comments(input)?;
    let mut items = Vec::new();
    let mut remaining = input;
    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>(')')(remaining) {
            return Ok((rest, Value::SExpr(items)));
        }
        let (rest, expr) = parse_expr(remaining)?;
        items.push(expr);
        let (rest, _) = ws_and_comments(rest)?;
        remaining = rest;
    }
}

fn parse_qexpr(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('{')(input)?;
    let (input, _) = ws_and_comments(input)?;
    let mut items = Vec::new();
    let mut remaining = input;
    loop {
        if let Ok((rest, _)) = char::<_, nom::error::Error<&str>>('}')(remaining) {
            return Ok((rest, Value::QExpr(items)));
        }
        let (rest, expr) = parse_expr(remaining)?;
        items.push(expr);
        let (rest, _) = ws_and_comments(rest)?;
        remaining = rest;
    }
}

fn parse_expr(input: &str) -> IResult<&str, Value> {
    let (input, _) = ws_and_comments(input)?;
    alt((parse_sexpr, parse_qexpr, parse_string, parse_number, parse_symbol)).parse(input)
}

/// Parses one full line as a *program*: zero or more top-level
/// expressions (spec.md §6.1's `program : expr*`). Each is evaluated and
/// printed independently by the REPL driver (spec.md §6.2).
pub fn parse_program(input: &str) -> Result<Vec<Value>, ReadError> {
    let mut exprs = Vec::new();
    let (mut remaining, _) =
        ws_and_comments(input).map_err(|e| ReadError::Syntax(format!("{e:?}")))?;

    while !remaining.is_empty() {
        match parse_expr(remaining) {
            Ok((rest, expr)) => {
                exprs.push(expr);
                let (rest, _) =
                    ws_and_comments(rest).map_err(|e| ReadError::Syntax(format!("{e:?}")))?;
                remaining = rest;
            }
            Err(e) => return Err(ReadError::Syntax(format!("{e:?}"))),
        }
    }

    Ok(exprs)
}

/// Convenience for callers that know the line holds exactly one top-level
/// expression (used by stdlib bootstrapping and tests).
pub fn parse_one(input: &str) -> Result<Value, ReadError> {
    let exprs = parse_program(input)?;
    exprs
        .into_iter()
        .next()
        .ok_or_else(|| ReadError::Syntax("no expression to parse".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_one("42").unwrap(), Value::Number(42));
        assert_eq!(parse_one("-7").unwrap(), Value::Number(-7));
        assert_eq!(parse_one("0").unwrap(), Value::Number(0));
    }

    #[test]
    fn numeric_overflow_is_a_value_error_not_a_read_error() {
        let huge = "99999999999999999999999999";
        let v = parse_one(huge).unwrap();
        assert_eq!(v, Value::Error("invalid number".to_string()));
    }

    #[test]
    fn parses_symbols_including_operators() {
        assert_eq!(parse_one("foo-bar").unwrap(), Value::Symbol("foo-bar".into()));
        assert_eq!(parse_one("+").unwrap(), Value::Symbol("+".into()));
        assert_eq!(parse_one(">=").unwrap(), Value::Symbol(">=".into()));
        assert_eq!(parse_one("&").unwrap(), Value::Symbol("&".into()));
    }

    #[test]
    fn parses_strings_with_escapes() {
        assert_eq!(parse_one(r#""hello""#).unwrap(), Value::Str("hello".into()));
        assert_eq!(
            parse_one(r#""a\nb\t\"c\"""#).unwrap(),
            Value::Str("a\nb\t\"c\"".into())
        );
        assert_eq!(parse_one(r#""""#).unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn parses_empty_and_nonempty_sexpr() {
        assert_eq!(parse_one("()").unwrap(), Value::SExpr(vec![]));
        match parse_one("(1 2 3)").unwrap() {
            Value::SExpr(items) => assert_eq!(items.len(), 3),
            _ => panic!("expected sexpr"),
        }
    }

    #[test]
    fn parses_qexpr() {
        match parse_one("{1 2 3}").unwrap() {
            Value::QExpr(items) => assert_eq!(items.len(), 3),
            _ => panic!("expected qexpr"),
        }
    }

    #[test]
    fn parses_nested_mixed_expr() {
        match parse_one("(def {x} 100)").unwrap() {
            Value::SExpr(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::Symbol("def".into()));
                assert_eq!(items[1], Value::QExpr(vec![Value::Symbol("x".into())]));
                assert_eq!(items[2], Value::Number(100));
            }
            _ => panic!("expected sexpr"),
        }
    }

    #[test]
    fn program_with_multiple_top_level_expressions() {
        let exprs = parse_program("(def {x} 100) x").unwrap();
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[1], Value::Symbol("x".into()));
    }

    #[test]
    fn comments_are_discarded() {
        let exprs = parse_program("; a comment\n42 ; trailing\n").unwrap();
        assert_eq!(exprs, vec![Value::Number(42)]);
    }

    #[test]
    fn empty_or_comment_only_line_is_empty_program() {
        assert_eq!(parse_program("").unwrap(), vec![]);
        assert_eq!(parse_program("  ; nothing here\n").unwrap(), vec![]);
    }

    #[test]
    fn unbalanced_parens_is_a_read_error() {
        assert!(parse_program("(1 2").is_err());
        assert!(parse_program(")").is_err());
        assert!(parse_program("{1 2").is_err());
    }

    #[test]
    fn variadic_sentinel_parses_as_symbol_inside_formals() {
        match parse_one("{x & xs}").unwrap() {
            Value::QExpr(items) => {
                assert_eq!(
                    items,
                    vec![
                        Value::Symbol("x".into()),
                        Value::Symbol("&".into()),
                        Value::Symbol("xs".into()),
                    ]
                );
            }
            _ => panic!("expected qexpr"),
        }
    }
}
