use std::{fs, path::Path, rc::Rc, thread};

use scenev::{
    STACK_SIZE,
    error::{Error, RuntimeErrorKind},
    global_context,
    interpreter::{
        evaluator::core::MAX_EVAL_DEPTH,
        lexer::{TokenKind, tokenize},
        scope::Context,
        value::core::Value,
    },
    run,
    span::Source,
};
use walkdir::WalkDir;

#[test]
fn script_transcripts_match() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "sv"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += check_transcript(path, &content);
    }

    assert!(count > 0, "No transcript lines found in tests/scripts");
}

/// Runs every `source ;; expected` line of a transcript in one session and
/// returns how many lines were checked.
fn check_transcript(path: &Path, content: &str) -> usize {
    let context = global_context();
    let mut checked = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (source, expected) = line.split_once(";;")
                                     .unwrap_or_else(|| panic!("{path:?}:{}: missing ';;'", i + 1));
        let (source, expected) = (source.trim(), expected.trim());
        let result = run(&path.display().to_string(), source, &context);

        match (expected.strip_prefix('!'), result) {
            (Some(needle), Err(e)) => {
                let report = e.to_string();
                assert!(report.contains(needle.trim()),
                        "{path:?}:{}: `{source}` failed with\n{report}\nexpected it to mention \
                         `{}`",
                        i + 1,
                        needle.trim());
            },
            (Some(_), Ok(v)) => {
                panic!("{path:?}:{}: `{source}` succeeded with {v:?}, expected {expected}", i + 1)
            },
            (None, Ok(v)) => {
                let shown = v.map(|v| v.to_string()).unwrap_or_default();
                assert_eq!(shown, expected, "{path:?}:{}: `{source}`", i + 1);
            },
            (None, Err(e)) => panic!("{path:?}:{}: `{source}` failed:\n{e}", i + 1),
        }
        checked += 1;
    }

    checked
}

fn eval_in(context: &Rc<Context>, src: &str) -> Option<Value> {
    run("<stdin>", src, context).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

fn assert_value(src: &str, expected: &str) {
    let context = global_context();
    let value = eval_in(&context, src).unwrap_or_else(|| panic!("`{src}` produced no value"));
    assert_eq!(value.to_string(), expected, "source: {src}");
}

fn assert_failure(src: &str) -> Error {
    let context = global_context();
    match run("<stdin>", src, &context) {
        Ok(v) => panic!("Script succeeded with {v:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn runtime_kind(src: &str) -> RuntimeErrorKind {
    match assert_failure(src) {
        Error::Runtime(e) => e.kind,
        other => panic!("expected a runtime error, got:\n{other}"),
    }
}

/// Runs `test` on a thread with the stack the interpreter is meant to run on.
fn on_interpreter_stack(test: impl FnOnce() + Send + 'static) {
    thread::Builder::new().stack_size(STACK_SIZE)
                          .spawn(test)
                          .unwrap()
                          .join()
                          .unwrap();
}

#[test]
fn lexing_produces_typed_tokens() {
    let tokens = tokenize(&Rc::new(Source::new("<stdin>", "12+3.5*2"))).unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds,
               vec![TokenKind::Int(12),
                    TokenKind::Plus,
                    TokenKind::Float(3.5),
                    TokenKind::Mul,
                    TokenKind::Int(2),
                    TokenKind::EndOfInput]);
}

#[test]
fn precedence_and_power_folding() {
    assert_value("2+3*4", "14");
    assert_value("(2+3)*4", "20");
    assert_value("2**3**2", "64");
}

#[test]
fn division_by_zero() {
    assert_eq!(runtime_kind("5/0"), RuntimeErrorKind::DivisionByZero);
    assert_eq!(runtime_kind("5/0.0"), RuntimeErrorKind::DivisionByZero);
}

#[test]
fn assignments_persist_across_inputs() {
    let context = global_context();
    assert!(eval_in(&context, "var x = 1").is_none());
    assert_eq!(eval_in(&context, "x").unwrap().to_string(), "1");
    eval_in(&context, "var x = 2");
    assert_eq!(eval_in(&context, "x").unwrap().to_string(), "2");
}

#[test]
fn for_loop_bindings_leak() {
    let context = global_context();
    assert!(eval_in(&context, "for i = 0 in 3 { var last = i }").is_none());
    assert_eq!(context.lookup("last").unwrap().to_string(), "2");
    assert_eq!(context.lookup("i").unwrap().to_string(), "3");
}

#[test]
fn closures_capture_defining_frame() {
    let context = global_context();
    eval_in(&context, "fn adder(x){ fn(y){ x + y } }");
    eval_in(&context, "var add3 = adder(3)");
    assert_eq!(eval_in(&context, "add3(4)").unwrap().to_string(), "7");
    assert!(context.lookup("x").is_none());
    assert!(context.lookup("y").is_none());
}

#[test]
fn function_bodies_do_not_leak_bindings() {
    let context = global_context();
    eval_in(&context, "fn f(a) { var inner = a }");
    assert!(eval_in(&context, "f(1)").is_none());
    assert!(context.lookup("inner").is_none());
    assert!(context.lookup("a").is_none());
}

#[test]
fn arity_mismatch_reports_difference() {
    let context = global_context();
    eval_in(&context, "fn pair(a, b) { a + b }");

    for (src, expected, found, text) in [("pair(1)", 2, 1, "1 too few args passed into 'pair'"),
                                         ("pair(1, 2, 3)", 2, 3, "1 too many args passed into 'pair'")]
    {
        let Err(Error::Runtime(e)) = run("<stdin>", src, &context) else {
            panic!("`{src}` should fail at runtime");
        };
        assert_eq!(e.kind,
                   RuntimeErrorKind::ArityMismatch { function: "pair".to_string(),
                                                     expected,
                                                     found });
        assert_eq!(e.kind.details(), text);
    }
}

#[test]
fn unclosed_paren_reports_missing_paren() {
    let err = assert_failure("(1+");
    assert!(matches!(&err, Error::Syntax(e) if e.message == "Expected ')'"));
    assert_eq!(err.to_string(),
               "Invalid Syntax: Expected ')'\n(File: <stdin>, Line: 1)\n\n(1+\n   ^");
}

#[test]
fn lexical_error_report() {
    let err = assert_failure("1 $ 2");
    assert!(matches!(err, Error::Lexical(_)));
    assert_eq!(err.to_string(),
               "Illegal Character: '$'\n(File: <stdin>, Line: 1)\n\n1 $ 2\n  ^");
    assert_eq!(assert_failure("1 ! 2").to_string(),
               "Expected Character: '=' (after '!')\n(File: <stdin>, Line: 1)\n\n1 ! 2\n  ^");
}

#[test]
fn runtime_error_traceback() {
    let context = global_context();
    eval_in(&context, "fn div(a) { a / 0 }");
    let err = run("<stdin>", "div(1)", &context).unwrap_err();
    assert_eq!(err.to_string(),
               "Traceback (most recent call last):\n(File <stdin>, line 1, in <program>)\n(File \
                <stdin>, line 1, in div)\nDivision By Zero: Division by zero\n\nfn div(a) { a / \
                0 }\n                ^");
}

#[test]
fn undefined_variable_points_at_use() {
    let err = assert_failure("1 + missing");
    assert_eq!(err.span().text(), "missing");
    assert_eq!(err.to_string(),
               "Traceback (most recent call last):\n(File <stdin>, line 1, in \
                <program>)\nUndefined Variable: 'missing' is not defined\n\n1 + missing\n    \
                ^^^^^^^");
}

#[test]
fn illegal_operation_spans_both_operands() {
    let err = assert_failure("\"a\" * 2");
    assert_eq!(err.span().text(), "\"a\" * 2");
    assert!(matches!(err, Error::Runtime(ref e) if e.kind.name() == "Illegal Operation"));
}

#[test]
fn calling_a_non_function() {
    let err = assert_failure("\"text\"(1)");
    assert_eq!(err.span().text(), "\"text\"");
    assert!(matches!(err, Error::Runtime(ref e) if e.kind == RuntimeErrorKind::NotCallable("string".to_string())));
}

#[test]
fn missing_value_is_an_error() {
    assert_eq!(runtime_kind("1 + (var x = 2)"), RuntimeErrorKind::MissingValue);
    assert_eq!(runtime_kind("if (for i = 0 in 1 { i }) { 1 }"), RuntimeErrorKind::MissingValue);
}

#[test]
fn value_display_text() {
    assert_value("1.0", "1");
    assert_value("2.5", "2.5");
    assert_value("\"a\\nb\"", "\"a\nb\"");
    assert_value("fn named() { 1 }", "<function named>");
    assert_value("fn () { 1 }", "<function <anonymous>>");
}

#[test]
fn logical_operators_evaluate_both_operands() {
    let undefined = RuntimeErrorKind::UndefinedVariable("nope".to_string());
    assert_eq!(runtime_kind("0 and nope"), undefined);
    assert_eq!(runtime_kind("1 or nope"), undefined);
}

#[test]
fn if_skips_cases_after_the_first_true_one() {
    assert_value("if 1 { 1 } elif nope { 2 }", "1");
    assert_value("if 0 { 1 } elif 1 { 2 } elif 1 { nope }", "2");
    assert_value("if 1 { 1 } else { 1 / 0 }", "1");
    assert_value("if 0 { nope } else { 3 }", "3");
}

#[test]
fn runaway_recursion_is_a_runtime_error() {
    on_interpreter_stack(|| {
        let context = global_context();
        eval_in(&context, "fn f(n) { if n { f(n - 1) } else { 0 } }");
        assert_eq!(eval_in(&context, "f(1000)").unwrap().to_string(), "0");

        let err = run("<stdin>", "f(20000)", &context).unwrap_err();
        assert!(matches!(&err,
                         Error::Runtime(e) if e.kind == RuntimeErrorKind::StackOverflow(MAX_EVAL_DEPTH)));
        assert!(err.to_string()
                   .contains(&format!("Stack Overflow: maximum recursion depth {MAX_EVAL_DEPTH} \
                                       exceeded")));

        // The session carries on at full depth after the failure.
        assert_eq!(eval_in(&context, "f(1000)").unwrap().to_string(), "0");
    });
}

#[test]
fn deeply_nested_input_is_a_syntax_error() {
    on_interpreter_stack(|| {
        let source = format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000));
        let err = assert_failure(&source);
        assert!(matches!(&err, Error::Syntax(e) if e.message == "Expression is nested too deeply"));
        assert!(err.to_string().starts_with("Invalid Syntax: Expression is nested too deeply"));
    });
}
