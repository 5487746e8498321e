//! `nom`-based parser for the match-expression language.
//!
//! Grammar, loosest binding first: `||`, `&&`, comparison
//! (`==` `!=` `<` `<=` `>` `>=`), unary `!`, primary (literal, dotted
//! attribute path, parenthesized expression).

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, anychar, char, digit1, multispace0},
    combinator::{all_consuming, map, opt, recognize, value, verify},
    error::VerboseError,
    multi::{fold_many0, many0_count, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    Finish, IResult,
};

use super::ast::{AttributePath, BinaryOp, Expr, Literal};
use crate::error::ExpressionError;

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parses one complete boolean expression.
pub(crate) fn parse_expression(input: &str) -> Result<Expr, ExpressionError> {
    match all_consuming(terminated(or_expr, multispace0))(input).finish() {
        Ok((_, expr)) => Ok(expr),
        Err(error) => Err(ExpressionError {
            expression: input.to_string(),
            reason: failure_reason(&error),
        }),
    }
}

fn failure_reason(error: &VerboseError<&str>) -> String {
    match error.errors.first() {
        Some((remaining, _)) if !remaining.is_empty() => {
            format!("unexpected input at '{remaining}'")
        }
        _ => "unexpected end of expression".to_string(),
    }
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    preceded(multispace0, inner)
}

fn or_expr(input: &str) -> ParseResult<'_, Expr> {
    let (input, first) = and_expr(input)?;
    fold_many0(
        preceded(ws(tag("||")), and_expr),
        move || first.clone(),
        |lhs, rhs| Expr::Binary {
            op: BinaryOp::Or,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
    )(input)
}

fn and_expr(input: &str) -> ParseResult<'_, Expr> {
    let (input, first) = comparison_expr(input)?;
    fold_many0(
        preceded(ws(tag("&&")), comparison_expr),
        move || first.clone(),
        |lhs, rhs| Expr::Binary {
            op: BinaryOp::And,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
    )(input)
}

fn comparison_expr(input: &str) -> ParseResult<'_, Expr> {
    let (input, lhs) = unary_expr(input)?;
    let (input, tail) = opt(pair(ws(comparison_op), unary_expr))(input)?;
    let expr = match tail {
        Some((op, rhs)) => Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        None => lhs,
    };
    Ok((input, expr))
}

fn comparison_op(input: &str) -> ParseResult<'_, BinaryOp> {
    alt((
        value(BinaryOp::Eq, tag("==")),
        value(BinaryOp::Ne, tag("!=")),
        value(BinaryOp::Le, tag("<=")),
        value(BinaryOp::Lt, tag("<")),
        value(BinaryOp::Ge, tag(">=")),
        value(BinaryOp::Gt, tag(">")),
    ))(input)
}

fn unary_expr(input: &str) -> ParseResult<'_, Expr> {
    alt((
        map(preceded(ws(char('!')), unary_expr), |inner| {
            Expr::Not(Box::new(inner))
        }),
        primary_expr,
    ))(input)
}

fn primary_expr(input: &str) -> ParseResult<'_, Expr> {
    ws(alt((
        delimited(char('('), or_expr, ws(char(')'))),
        map(string_literal, |text| Expr::Literal(Literal::String(text))),
        number_literal,
        word_expr,
    )))(input)
}

/// Keywords (`true`, `false`, `null`) and dotted attribute paths share the
/// identifier lexer, so a path like `event.truelike` never collides.
fn word_expr(input: &str) -> ParseResult<'_, Expr> {
    let (rest, segments) = separated_list1(char('.'), identifier)(input)?;
    let expr = match segments.as_slice() {
        ["true"] => Expr::Literal(Literal::Bool(true)),
        ["false"] => Expr::Literal(Literal::Bool(false)),
        ["null"] => Expr::Literal(Literal::Null),
        _ => Expr::Attribute(AttributePath {
            root: segments[0].to_string(),
            segments: segments[1..].iter().map(|s| s.to_string()).collect(),
        }),
    };
    Ok((rest, expr))
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn number_literal(input: &str) -> ParseResult<'_, Expr> {
    let (rest, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)?;

    let literal = if text.contains('.') {
        match text.parse::<f64>() {
            Ok(number) => Literal::Float(number),
            Err(_) => {
                return Err(nom::Err::Failure(VerboseError {
                    errors: vec![(input, nom::error::VerboseErrorKind::Context("float"))],
                }))
            }
        }
    } else {
        match text.parse::<i64>() {
            Ok(number) => Literal::Int(number),
            // Out of i64 range; keep the magnitude as a float.
            Err(_) => Literal::Float(text.parse::<f64>().unwrap_or(f64::MAX)),
        }
    };

    Ok((rest, Expr::Literal(literal)))
}

fn string_literal(input: &str) -> ParseResult<'_, String> {
    alt((quoted_string('"'), quoted_string('\'')))(input)
}

fn quoted_string<'a>(quote: char) -> impl FnMut(&'a str) -> ParseResult<'a, String> {
    move |input: &'a str| {
        delimited(
            char(quote),
            fold_many0(
                alt((
                    preceded(char('\\'), escape_char),
                    verify(anychar, move |c| *c != quote && *c != '\\'),
                )),
                String::new,
                |mut text, c| {
                    text.push(c);
                    text
                },
            ),
            char(quote),
        )(input)
    }
}

fn escape_char(input: &str) -> ParseResult<'_, char> {
    alt((
        value('\\', char('\\')),
        value('"', char('"')),
        value('\'', char('\'')),
        value('\n', char('n')),
        value('\t', char('t')),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::parse_expression;
    use crate::expression::ast::{AttributePath, BinaryOp, Expr, Literal};

    fn attribute(root: &str, segments: &[&str]) -> Expr {
        Expr::Attribute(AttributePath {
            root: root.to_string(),
            segments: segments.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn parses_topic_equality() {
        let expr = parse_expression(r#"event.topic == "orders""#).unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Eq,
                lhs: Box::new(attribute("event", &["topic"])),
                rhs: Box::new(Expr::Literal(Literal::String("orders".to_string()))),
            }
        );
    }

    #[test]
    fn or_binds_looser_than_and() {
        let expr = parse_expression("true || false && false").unwrap();
        let Expr::Binary { op, rhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(
            *rhs,
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        ));
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = parse_expression("(true || false) && false").unwrap();
        let Expr::Binary { op, lhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(
            *lhs,
            Expr::Binary {
                op: BinaryOp::Or,
                ..
            }
        ));
    }

    #[test]
    fn parses_nested_attribute_path() {
        let expr = parse_expression("event.data.amount >= 100").unwrap();
        let Expr::Binary { op, lhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Ge);
        assert_eq!(*lhs, attribute("event", &["data", "amount"]));
    }

    #[test]
    fn parses_negation_and_single_quotes() {
        let expr = parse_expression("!(event.type == 'audit')").unwrap();
        assert!(matches!(expr, Expr::Not(_)));
    }

    #[test]
    fn parses_numeric_literals() {
        assert_eq!(
            parse_expression("-3 < 2.5").unwrap(),
            Expr::Binary {
                op: BinaryOp::Lt,
                lhs: Box::new(Expr::Literal(Literal::Int(-3))),
                rhs: Box::new(Expr::Literal(Literal::Float(2.5))),
            }
        );
    }

    #[test]
    fn parses_escaped_string() {
        let expr = parse_expression(r#"event.note == "line\nbreak \"q\"""#).unwrap();
        let Expr::Binary { rhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(
            *rhs,
            Expr::Literal(Literal::String("line\nbreak \"q\"".to_string()))
        );
    }

    #[test]
    fn keywords_do_not_swallow_identifier_prefixes() {
        let expr = parse_expression("event.truthy == true").unwrap();
        let Expr::Binary { lhs, .. } = expr else {
            panic!("expected binary expression");
        };
        assert_eq!(*lhs, attribute("event", &["truthy"]));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_expression(r#"event.topic == "a" extra"#).is_err());
    }

    #[test]
    fn rejects_dangling_operator() {
        let error = parse_expression("event.topic ==").unwrap_err();
        assert_eq!(error.expression, "event.topic ==");
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_expression("").is_err());
        assert!(parse_expression("   ").is_err());
    }
}
