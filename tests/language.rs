use std::{
    fs::{self},
    path::Path,
};

use subc::{
    config::{DEFAULT_MAX_CALL_DEPTH, InterpreterConfig},
    error::{Error, RuntimeError},
    run_source,
};
use walkdir::WalkDir;

/// Runs `src` and returns its output together with the outcome.
fn run_with(src: &str, config: &InterpreterConfig) -> (String, Result<(), Error>) {
    let mut out = Vec::new();
    let result = run_source(src, &mut out, config);
    (String::from_utf8(out).expect("output is not UTF-8"), result)
}

fn output_of(src: &str) -> String {
    match run_with(src, &InterpreterConfig::default()) {
        (output, Ok(())) => output,
        (output, Err(e)) => panic!("Script failed: {e}\noutput so far: {output:?}"),
    }
}

/// Runs the body of `main` and returns what it prints.
fn main_output(body: &str) -> String {
    output_of(&format!("Program t;\nint main() {{\n{body}\n}}"))
}

fn runtime_error(src: &str) -> (String, RuntimeError) {
    match run_with(src, &InterpreterConfig::default()) {
        (output, Err(Error::Runtime(e))) => (output, e),
        (_, Err(e)) => panic!("Expected a runtime error, got: {e}"),
        (output, Ok(())) => panic!("Script succeeded but was expected to fail: {output:?}"),
    }
}

fn main_runtime_error(body: &str) -> (String, RuntimeError) {
    runtime_error(&format!("Program t;\nint main() {{\n{body}\n}}"))
}

#[test]
fn sample_programs_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "c"))
    {
        let path = entry.path();
        let src =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expected_output(path);

        count += 1;
        let (output, result) = run_with(&src, &InterpreterConfig::default());
        if let Err(e) = result {
            panic!("Program {path:?} failed: {e}\noutput so far: {output:?}");
        }
        assert_eq!(output, expected, "output of {path:?} differs");
    }

    assert!(count > 0, "No sample programs found in tests/programs");
}

fn expected_output(program: &Path) -> String {
    let path = program.with_extension("out");
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

#[test]
fn while_loop_counts() {
    assert_eq!(main_output("int x = 0;\nwhile (x < 5) { print(\"%d \", x); x = x + 1; }"),
               "0 1 2 3 4 ");
}

#[test]
fn max_of_three_in_every_order() {
    let src = r#"
        Program maxes;
        int max(int x, int y, int z) {
            if (x > y) {
                if (x > z) return x; else return z;
            } else {
                if (y > z) return y; else return z;
            }
        }
        int main() {
            print("%d%d%d", max(1, 2, 3), max(1, 3, 2), max(2, 1, 3));
            print("%d%d%d", max(2, 3, 1), max(3, 1, 2), max(3, 2, 1));
        }
    "#;

    assert_eq!(output_of(src), "333333");
}

#[test]
fn switch_falls_through_until_break() {
    let src = r#"
        Program sw;
        char pick(char ch) {
            switch (ch) {
                case 'a': return 'a';
                case 'd': return 'd';
                default: return 'b';
            }
        }
        int main() {
            print("%c%c%c", pick('a'), pick('d'), pick('c'));
            int n = 2;
            switch (n) {
                case 1: print("one");
                case 2: print("two");
                case 3: print("three"); break;
                case 4: print("four");
            }
            switch (n) { case 9: print("nine"); }
            switch (7) { default: print(" default"); case 1: print(" after"); }
        }
    "#;

    assert_eq!(output_of(src), "adbtwothree default after");
}

#[test]
fn for_loops_and_scopes() {
    assert_eq!(main_output("for (int i = 0; i < 3; i = i + 1) { print(\"%d\", i); }\nint i = 7;\nprint(\" %d\", i);"),
               "012 7");
    assert_eq!(main_output("int i;\nfor (i = 10; ; i = i - 3) { if (i < 0) break; print(\"%d,\", i); }"),
               "10,7,4,1,");
    assert_eq!(main_output("int x = 1;\n{ int x = 2; print(\"%d\", x); }\nprint(\"%d\", x);"),
               "21");
}

#[test]
fn break_leaves_only_the_innermost_loop() {
    let body = r#"
        int i = 0;
        while (i < 3) {
            for (;;) { break; }
            switch (i) { case 1: break; default: print("%d", i); }
            i = i + 1;
        }
    "#;

    assert_eq!(main_output(body), "02");
}

#[test]
fn uninitialized_variables_have_defaults() {
    assert_eq!(main_output("int i;\nchar c;\nstring s;\nprint(\"%d %c %s\", i, c, s);"),
               "0 # #");
}

#[test]
fn globals_are_shared_between_functions() {
    let src = r#"
        Program globals;
        int calls;
        int base = 40 + 2;
        void touch() { calls = calls + 1; }
        int main() {
            touch(); touch(); touch();
            print("%d %d", calls, base);
        }
    "#;

    assert_eq!(output_of(src), "3 42");
}

#[test]
fn recursion_and_forward_calls() {
    let src = r#"
        Program rec;
        int main() {
            print("%d %d", fact(10), is_even(10));
        }
        int fact(int n) { if (n <= 1) return 1; return n * fact(n - 1); }
        int is_even(int n) { if (n == 0) return 1; return is_odd(n - 1); }
        int is_odd(int n) { if (n == 0) return 0; return is_even(n - 1); }
    "#;

    assert_eq!(output_of(src), "3628800 1");
}

#[test]
fn arguments_are_passed_by_value() {
    let src = r#"
        Program byval;
        void bump(int x) { x = x + 1; print("%d ", x); }
        int main() { int x = 1; bump(x); print("%d", x); }
    "#;

    assert_eq!(output_of(src), "2 1");
}

#[test]
fn arithmetic_and_comparisons() {
    assert_eq!(main_output("print(\"%d %d %d %d\", 7 / 2, -7 / 2, 7 % 3, -7 % 3);"),
               "3 -3 1 -1");
    assert_eq!(main_output("print(\"%d%d%d%d%d%d\", 1 < 2, 2 < 1, 2 <= 2, 3 >= 4, 1 == 1, 1 != 1);"),
               "101010");
    assert_eq!(main_output("print(\"%d %d %d\", 'a' + 1, !5, !0);"), "98 0 1");
    assert_eq!(main_output("int a;\nint b;\na = b = 3;\nprint(\"%d %d\", a, b);"),
               "3 3");
}

#[test]
fn logical_operators_short_circuit() {
    let src = r#"
        Program sc;
        int hits;
        int hit() { hits = hits + 1; return 1; }
        int main() {
            int r = 0 && hit();
            r = r + (1 || hit());
            r = r + (1 && hit());
            r = r + (0 || hit());
            print("%d %d", r, hits);
        }
    "#;

    assert_eq!(output_of(src), "3 2");
}

#[test]
fn char_values_widen_to_int() {
    let src = r#"
        Program widen;
        int code(int n) { return n; }
        char letter() { return 'z'; }
        int main() {
            int i = 'A';
            print("%d %d %c", i, code('B'), letter());
        }
    "#;

    assert_eq!(output_of(src), "65 66 z");
}

#[test]
fn print_formats() {
    assert_eq!(main_output(r#"print("100%% %s|%c|%d\n", "done", '\t', -4);"#),
               "100% done|\t|-4\n");
}

#[test]
fn print_format_errors() {
    let (_, e) = main_runtime_error(r#"print("%d", 'c');"#);
    assert!(matches!(e, RuntimeError::FormatTypeMismatch { verb: 'd', .. }));

    let (_, e) = main_runtime_error(r#"print("%q", 1);"#);
    assert!(matches!(e, RuntimeError::UnknownFormatVerb { verb: 'q', .. }));

    let (_, e) = main_runtime_error(r#"print("50%");"#);
    assert!(matches!(e, RuntimeError::DanglingPercent { .. }));

    let (_, e) = main_runtime_error(r#"print("%d %d", 1);"#);
    assert!(matches!(e, RuntimeError::MissingFormatArgument { verb: 'd', .. }));

    let (_, e) = main_runtime_error(r#"print("x", 1);"#);
    assert!(matches!(e, RuntimeError::UnusedFormatArguments { count: 1, .. }));

    // A failing call prints nothing at all.
    let (output, _) = main_runtime_error(r#"print("ok "); print("partial %d %s", 1, 2);"#);
    assert_eq!(output, "ok ");
}

#[test]
fn division_by_zero_stops_the_program() {
    let (output, e) = main_runtime_error("print(\"before \");\nprint(\"%d\", 5 / 0);\nprint(\"after\");");

    assert_eq!(output, "before ");
    assert!(matches!(e, RuntimeError::DivisionByZero { .. }));
    assert_eq!(e.position().map(|p| p.line), Some(4));

    let (_, e) = main_runtime_error("int zero;\nint r = 1 % zero;");
    assert!(matches!(e, RuntimeError::DivisionByZero { .. }));
}

#[test]
fn integer_overflow_is_an_error() {
    let (_, e) = main_runtime_error("int big = 9223372036854775807;\nbig = big + 1;");
    assert!(matches!(e, RuntimeError::Overflow { .. }));

    let (_, e) = main_runtime_error("int min = -9223372036854775807 - 1;\nmin = -min;");
    assert!(matches!(e, RuntimeError::Overflow { .. }));

    let (_, e) = main_runtime_error("int min = -9223372036854775807 - 1;\nmin = min / -1;");
    assert!(matches!(e, RuntimeError::Overflow { .. }));
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let src = "Program deep; int down(int n) { return down(n + 1); } int main() { return down(0); }";
    let config = InterpreterConfig::default().with_max_call_depth(64);

    match run_with(src, &config) {
        (_, Err(Error::Runtime(RuntimeError::StackOverflow { limit, .. }))) => assert_eq!(limit, 64),
        (_, other) => panic!("Expected a stack overflow, got {other:?}"),
    }

    let bounded = "Program ok; int down(int n) { if (n == 0) return 0; return down(n - 1); } int main() { print(\"%d\", down(50)); }";
    let (output, result) = run_with(bounded, &config);
    assert!(result.is_ok());
    assert_eq!(output, "0");
}

#[test]
fn default_depth_limit_is_reachable_from_any_thread() {
    let runaway = "Program deep; int down(int n) { return down(n + 1); } int main() { return down(0); }";

    let (_, e) = runtime_error(runaway);
    assert!(matches!(e, RuntimeError::StackOverflow { limit: DEFAULT_MAX_CALL_DEPTH, .. }),
            "unexpected error: {e}");

    let deep = r#"
        Program deep;
        int down(int n) {
            if (n == 0) return 0;
            if (n % 2 == 0) {
                while (1) { return 1 + down(n - 1); }
            }
            return 1 + down(n - 1);
        }
        int main() { print("%d", down(998)); }
    "#;
    assert_eq!(output_of(deep), "998");
}

#[test]
fn main_is_required_and_takes_no_parameters() {
    let (_, e) = runtime_error("Program nomain; int helper() { return 1; }");
    assert_eq!(e, RuntimeError::MissingMain { program: "nomain".into() });

    let (_, e) = runtime_error("Program badmain; int main(int argc) { return argc; }");
    assert!(matches!(e, RuntimeError::InvalidMain { .. }));
}

#[test]
fn falling_off_a_value_function_is_an_error() {
    let src = r#"
        Program fall;
        int f(int x) { if (x) return 1; }
        int main() { print("%d", f(1)); print("%d", f(0)); }
    "#;

    let (output, e) = runtime_error(src);
    assert_eq!(output, "1");
    assert!(matches!(e, RuntimeError::MissingReturnValue { ref name, .. } if name == "f"));
}

#[test]
fn main_falls_off_with_its_default() {
    assert_eq!(main_output("print(\"done\");"), "done");
    assert_eq!(output_of("Program v; void main() { print(\"v\"); return; }"), "v");
}

#[test]
fn exit_codes_follow_the_failing_stage() {
    let config = InterpreterConfig::default();
    let code = |src: &str| {
        run_with(src, &config).1
                              .err()
                              .map(|e| e.exit_code())
    };

    assert_eq!(code("Program p; int main() { return 0; }"), None);
    assert_eq!(code("Program p; int main() { return 0 @ }"), Some(2));
    assert_eq!(code("Program p; int main() { return 0 }"), Some(3));
    assert_eq!(code("Program p; int main() { return x; }"), Some(4));
    assert_eq!(code("Program p; int main() { return 1 / 0; }"), Some(5));
}
