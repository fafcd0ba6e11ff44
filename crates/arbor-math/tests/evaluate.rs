use arbor_errors::{Error, TextRange};
use arbor_math::{Environment, EvalError, engine, evaluate_str};
use arbor_parse::{Config, Parsed};
use expect_test::{Expect, expect};

fn eval_with(text: &str, env: &Environment) -> Result<f64, EvalError> {
    let engine = engine(Config::default()).unwrap();
    evaluate_str(&engine, text, env)
}

fn eval(text: &str) -> Result<f64, EvalError> {
    eval_with(text, &Environment::new())
}

fn assert_close(text: &str, expected: f64) {
    let actual = eval(text).unwrap_or_else(|error| panic!("{text}: {error}"));
    assert!((actual - expected).abs() < 1e-9, "{text}: expected {expected}, got {actual}");
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn check_tree(text: &str, expect: Expect) {
    let engine = engine(Config::default()).unwrap();
    let Parsed { tokens, tree } = engine.process(text).unwrap();
    expect.assert_eq(&tree.display(&tokens).to_string());
}

#[test]
fn operator_precedence() {
    assert_close("2 + 3 * 4", 14.0);
    assert_close("(2 + 3) * 4", 20.0);
    assert_close("10 - 4 - 3", 3.0);
    assert_close("64 / 4 / 2", 8.0);
    assert_close("2 ^ 3 ^ 2", 512.0);
    assert_close("2 * 3 ^ 2", 18.0);
}

#[test]
fn unary_minus() {
    assert_close("-3", -3.0);
    assert_close("2 - -3", 5.0);
    assert_close("2 * -3", -6.0);
    assert_close("--3", 3.0);
    assert_close("2 ^ -1", 0.5);
    assert_close("-2 ^ 2", 4.0);
    assert_close("|-3| - 1", 2.0);
    assert_close("log(8, -(-2))", 3.0);
}

#[test]
fn constants_and_variables() {
    assert_close("pi", std::f64::consts::PI);
    assert_close("ln(e)", 1.0);

    let env: Environment = [('x', 3.0), ('y', 4.0)].into_iter().collect();
    let value = eval_with("sqrt(x^2 + y^2)", &env).unwrap();
    assert!((value - 5.0).abs() < 1e-9);
}

#[test]
fn functions() {
    assert_close("sin(0) + cos(0)", 1.0);
    assert_close("tg(0) + tan(0)", 0.0);
    assert_close("ctg(pi / 4)", 1.0);
    assert_close("arcsin(1) * 2", std::f64::consts::PI);
    assert_close("atan(1) * 4", std::f64::consts::PI);
    assert_close("log2(8) + log10(1000)", 6.0);
    assert_close("log(81; 3)", 4.0);
    assert_close("exp(0)", 1.0);
    assert_close("sign(-7) + sign(0) + sign(2)", 0.0);
    assert_close("tanh(0) + sinh(0) + cosh(0)", 1.0);
    assert_close("arctanh(tanh(0.5))", 0.5);
    assert_close("asinh(sinh(2)) + acosh(cosh(1))", 3.0);
    assert_close("sin(pi / 2)^2 + |cos(pi)|", 2.0);
}

#[test]
fn evaluation_errors() {
    assert_eq!(eval("1 / (2 - 2)"), Err(EvalError::DivisionByZero { range: range(2, 3) }));
    assert_eq!(eval("sqrt(-4)"), Err(EvalError::NegativeRoot { range: range(0, 5) }));
    assert_eq!(eval("(-8) ^ 0.5"), Err(EvalError::NegativeRoot { range: range(5, 6) }));
    assert_close("(-2) ^ 3", -8.0);
    assert_eq!(eval("x + 1"), Err(EvalError::UnresolvedSymbol { name: 'x', range: range(0, 1) }));
}

#[test]
fn wrong_argument_counts() {
    assert_eq!(
        eval("sin(1, 2)"),
        Err(EvalError::Core(Error::UnexpectedSubexpressionCount {
            got: 2,
            expected: 1,
            range: range(0, 4)
        }))
    );
    assert_eq!(
        eval("log(8)"),
        Err(EvalError::Core(Error::UnexpectedSubexpressionCount {
            got: 1,
            expected: 2,
            range: range(0, 4)
        }))
    );
    assert_eq!(
        eval("2 +"),
        Err(EvalError::Core(Error::UnexpectedSubexpressionCount {
            got: 1,
            expected: 2,
            range: range(2, 3)
        }))
    );
}

#[test]
fn core_errors_pass_through() {
    assert_eq!(eval(""), Err(EvalError::Core(Error::EmptyExpression)));
    assert_eq!(eval("(1 + 2"), Err(EvalError::Core(Error::NoMatchingToken { range: range(0, 1) })));
    assert_eq!(eval("1 # 2"), Err(EvalError::Core(Error::UnexpectedToken { offset: 2.into() })));
    assert_eq!(
        eval("2.5.5"),
        Err(EvalError::Core(Error::IncorrectlyFormedNumber { offset: 3.into() }))
    );
}

#[test]
fn stray_tokens() {
    for text in ["2x", "1e5", "(2)(3)", "1, 2", "2 sin(0)", "|2|7"] {
        assert_eq!(
            eval(text),
            Err(EvalError::Core(Error::WrongTokenType { range: range(0, 1) })),
            "{text}"
        );
    }
    assert_eq!(eval("2,"), Err(EvalError::Core(Error::WrongTokenType { range: range(1, 2) })));
    assert_eq!(eval("sin(0) 2"), Err(EvalError::Core(Error::WrongTokenType { range: range(7, 8) })));
}

#[test]
fn trees() {
    check_tree(
        "-x^2 + log(y, 2)",
        expect![[r#"
            + @5..6
              ^ @2..3
                neg @0..1
                  x @1..2
                2 @3..4
              log( @7..11
                y @11..12
                2 @14..15
        "#]],
    );
    check_tree(
        "|a - b| * 2.5",
        expect![[r#"
            * @8..9
              | @0..1
                - @3..4
                  a @1..2
                  b @5..6
              2.5 @10..13
        "#]],
    );
    assert_close("2^-3^2", 512.0);
    check_tree(
        "2^-3^2",
        expect![[r#"
            ^ @1..2
              2 @0..1
              ^ @4..5
                neg @2..3
                  3 @3..4
                2 @5..6
        "#]],
    );
}
