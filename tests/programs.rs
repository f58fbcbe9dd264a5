use std::fs;

use let_lang::{
    Error,
    interpreter::EvalError,
    parser::{MAX_NESTING, ParseError},
    run,
    tokeniser::TokenKind,
};
use walkdir::WalkDir;

#[test]
fn demo_programs_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "let"))
    {
        let path = entry.path();
        let program =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {expected_path:?}: {e}"));

        count += 1;
        match run(&program) {
            Ok(result) => assert_eq!(result, expected.trim(), "wrong result for {path:?}"),
            Err(e) => panic!("Demo program {path:?} failed:\n{program}\nError: {e}"),
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

#[test]
fn worked_examples() {
    assert_eq!(run("minus(10, 3)").unwrap(), "7");
    assert_eq!(run("iszero(0)").unwrap(), "true");
    assert_eq!(run("iszero(5)").unwrap(), "false");
    assert_eq!(run("if iszero(0) then 1 else 2").unwrap(), "1");
    assert_eq!(run("let x = 1 in let x = 2 in x").unwrap(), "2");
    assert_eq!(run("let x = 1 in minus(x, let x = 99 in x)").unwrap(), "-98");
}

#[test]
fn self_reference_is_unbound() {
    assert_eq!(
        run("let x = x in x"),
        Err(Error::Eval(EvalError::UnboundVariable {
            name: "x".to_string()
        }))
    );
}

#[test]
fn missing_paren_names_right_paren() {
    for _ in 0..3 {
        match run("minus(1, 2") {
            Err(Error::Parse(ParseError::Expected { expected, found })) => {
                assert_eq!(expected, TokenKind::RightParen);
                assert_eq!(found.kind, TokenKind::EndOfInput);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}

#[test]
fn error_messages_reach_the_caller() {
    let err = run("minus(iszero(0), 1)").unwrap_err();
    assert_eq!(
        err.to_string(),
        "evaluation error: type mismatch: expected an integer, but IsZeroExp(ConstExp(0)) evaluated to true"
    );
    let err = run("let y = 1 in z").unwrap_err();
    assert_eq!(err.to_string(), "evaluation error: unbound identifier \"z\"");
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    for depth in [10_000, 200_000] {
        let program = format!("{}0{}", "iszero(".repeat(depth), ")".repeat(depth));
        assert_eq!(
            run(&program),
            Err(Error::Parse(ParseError::TooDeep { limit: MAX_NESTING }))
        );
    }

    let program = format!("{}x", "let x = 1 in ".repeat(MAX_NESTING - 1));
    assert_eq!(run(&program).unwrap(), "1");
}
