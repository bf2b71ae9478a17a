use subc::{
    ast::Type,
    check_source,
    error::{Error, SemanticErrorKind},
    interpreter::checker::{CheckedProgram, xref::SymbolKind},
    util::position::Position,
};

fn assert_valid(src: &str) -> CheckedProgram {
    check_source(src).unwrap_or_else(|e| panic!("Check failed: {e}\n{src}"))
}

/// Checks `src` and returns the kinds of every semantic error found.
fn errors(src: &str) -> Vec<SemanticErrorKind> {
    match check_source(src) {
        Err(Error::Semantic(errors)) => errors.kinds().cloned().collect(),
        Err(e) => panic!("Expected semantic errors, got: {e}"),
        Ok(_) => panic!("Check succeeded but was expected to fail:\n{src}"),
    }
}

/// Checks a `main` whose body is `body`, after the given globals and
/// functions.
fn errors_in_main(prelude: &str, body: &str) -> Vec<SemanticErrorKind> {
    errors(&format!("Program t;\n{prelude}\nint main() {{\n{body}\n}}"))
}

#[test]
fn well_formed_programs_pass() {
    assert_valid(r#"
        Program ok;
        int limit = 3;
        char pick(int n) {
            switch (n) {
                case 0: return 'a';
                case 1: return 'b';
                default: return 'z';
            }
        }
        int main() {
            int total = 0;
            for (int i = 0; i < limit; i = i + 1) {
                total = total + pick(i);
            }
            while (total > 0 && !(total == 1)) total = total / 2;
            print("%d %c %s\n", total, pick(5), "done");
            return later(total);
        }
        int later(int x) { return x; }
    "#);
}

#[test]
fn unknown_names() {
    assert_eq!(errors_in_main("", "x = 1;"),
               [SemanticErrorKind::UnknownVariable { name: "x".into() }]);
    assert_eq!(errors_in_main("", "missing(1);"),
               [SemanticErrorKind::UnknownFunction { name: "missing".into() }]);
}

#[test]
fn all_errors_are_collected_in_source_order() {
    let found = errors_in_main("void v() { }",
                               "int a = \"s\";\nstring s = 1;\nb = 2;\nif (s) { }\nbreak;\nint c = v();");

    assert_eq!(found,
               [SemanticErrorKind::TypeMismatch { expected: Type::Int,
                                                  found:    Type::String, },
                SemanticErrorKind::TypeMismatch { expected: Type::String,
                                                  found:    Type::Int, },
                SemanticErrorKind::UnknownVariable { name: "b".into() },
                SemanticErrorKind::InvalidCondition { found: Type::String },
                SemanticErrorKind::BreakOutsideLoop,
                SemanticErrorKind::VoidValue { name: "v".into() }]);
}

#[test]
fn errors_carry_positions() {
    let Err(Error::Semantic(errors)) = check_source("Program t;\nint main() {\n    return y;\n}") else {
        panic!("expected semantic errors")
    };

    let first = errors.iter().next().unwrap();
    assert_eq!(first.position, Position::new(3, 12));
    assert_eq!(first.to_string(), "Error at line 3, column 12: Unknown variable 'y'.");

    let as_error: &dyn std::error::Error = first;
    assert!(as_error.source().is_none());
}

#[test]
fn char_widens_to_int_but_nothing_narrows() {
    assert_valid("Program t; int f(int x) { return x; } int main() { int i = 'a'; i = 'b'; return f('c'); }");

    assert_eq!(errors_in_main("", "char c = 65;"),
               [SemanticErrorKind::TypeMismatch { expected: Type::Char,
                                                  found:    Type::Int, }]);
    assert_eq!(errors("Program t; char f() { return 1; } int main() { return 0; }"),
               [SemanticErrorKind::TypeMismatch { expected: Type::Char,
                                                  found:    Type::Int, }]);
}

#[test]
fn strings_support_no_operators() {
    assert_eq!(errors_in_main("", "string s = \"a\";\nint x = s == s;"),
               [SemanticErrorKind::InvalidOperand { operator: "==".into(),
                                                    operand:  Type::String, },
                SemanticErrorKind::InvalidOperand { operator: "==".into(),
                                                    operand:  Type::String, }]);
    assert_eq!(errors_in_main("", "int x = -\"a\";"),
               [SemanticErrorKind::InvalidOperand { operator: "-".into(),
                                                    operand:  Type::String, }]);
}

#[test]
fn calls_are_checked_against_signatures() {
    let found = errors_in_main("int add(int a, int b) { return a + b; }",
                               "add(1);\nadd(1, \"two\");");

    assert_eq!(found,
               [SemanticErrorKind::ArgumentCountMismatch { name:     "add".into(),
                                                           expected: 2,
                                                           found:    1, },
                SemanticErrorKind::TypeMismatch { expected: Type::Int,
                                                  found:    Type::String, }]);
}

#[test]
fn print_needs_a_string_format() {
    assert_eq!(errors_in_main("", "print();"), [SemanticErrorKind::MissingFormatString]);
    assert_eq!(errors_in_main("", "print(1);"),
               [SemanticErrorKind::TypeMismatch { expected: Type::String,
                                                  found:    Type::Int, }]);
}

#[test]
fn declarations_are_unique_per_scope() {
    assert_eq!(errors_in_main("", "int x;\nchar x;"),
               [SemanticErrorKind::Redeclared { name: "x".into() }]);
    assert_eq!(errors("Program t; int f(int a) { int a = 1; return a; } int main() { return 0; }"),
               [SemanticErrorKind::Redeclared { name: "a".into() }]);

    assert_valid("Program t; int x; int main() { int x = 1; { int x = 2; } for (int x = 0; x < 1; x = x + 1) { } return x; }");
}

#[test]
fn function_names_are_checked() {
    assert_eq!(errors("Program t; int f() { return 1; } int f() { return 2; } int main() { return 0; }"),
               [SemanticErrorKind::FunctionAlreadyDefined { name: "f".into() }]);
    assert_eq!(errors("Program t; void print(string s) { } int main() { return 0; }"),
               [SemanticErrorKind::BuiltinFunctionRedefinition { name: "print".into() }]);
}

#[test]
fn globals_are_visible_only_after_their_declaration() {
    assert_eq!(errors("Program t; int a = b; int b = 1; int main() { return a; }"),
               [SemanticErrorKind::UnknownVariable { name: "b".into() }]);
}

#[test]
fn return_statements_match_the_function() {
    assert_eq!(errors("Program t; void f() { return 1; } int main() { return 0; }"),
               [SemanticErrorKind::UnexpectedReturnValue { name: "f".into() }]);
    assert_eq!(errors("Program t; int f() { return; } int main() { return 0; }"),
               [SemanticErrorKind::MissingReturnValue { name:     "f".into(),
                                                        expected: Type::Int, },
                SemanticErrorKind::MissingReturn { name:        "f".into(),
                                                   return_type: Type::Int, }]);
}

#[test]
fn value_functions_need_a_reachable_return() {
    assert_eq!(errors("Program t; int f(int x) { if (x) { x = 1; } } int main() { return 0; }"),
               [SemanticErrorKind::MissingReturn { name:        "f".into(),
                                                   return_type: Type::Int, }]);

    // The return after `break` can never run.
    assert_eq!(errors("Program t; int f() { while (1) { break; return 1; } } int main() { return 0; }"),
               [SemanticErrorKind::MissingReturn { name:        "f".into(),
                                                   return_type: Type::Int, }]);

    assert_valid("Program t; int f(int x) { if (x) return 1; else return 2; }\nint main() { return f(0); }");
    assert_valid("Program t; int f(int x) { while (x) { return x; } return 0; }\nint main() { return f(0); }");
}

#[test]
fn main_may_fall_off_its_end() {
    assert_valid("Program t; int main() { print(\"hi\"); }");
    assert_valid("Program t; char main() { }");
}

#[test]
fn switch_rules() {
    assert_eq!(errors_in_main("", "string s;\nswitch (s) { default: break; }"),
               [SemanticErrorKind::InvalidSwitchType { found: Type::String }]);
    assert_eq!(errors_in_main("", "int n;\nswitch (n) { case 'a': break; }"),
               [SemanticErrorKind::TypeMismatch { expected: Type::Int,
                                                  found:    Type::Char, }]);
    assert_eq!(errors_in_main("", "int n;\nswitch (n) { case 1: case 2: case 1: break; }"),
               [SemanticErrorKind::DuplicateCase { label: "1".into() }]);
    assert_eq!(errors_in_main("", "char c;\nswitch (c) { default: break; default: break; }"),
               [SemanticErrorKind::DuplicateDefault]);

    assert_valid("Program t; int main() { char c = 'x'; switch (c) { case 'x': break; case 'y': } }");
}

#[test]
fn void_is_not_a_variable_type() {
    assert_eq!(errors_in_main("", "void v;"),
               [SemanticErrorKind::VoidVariable { name: "v".into() }]);
    assert_eq!(errors("Program t; int f(void p) { return 0; } int main() { return 0; }"),
               [SemanticErrorKind::VoidVariable { name: "p".into() }]);
}

#[test]
fn cross_reference_records_declarations_and_uses() {
    let checked = assert_valid("Program xref;\n\
                                int g = 1;\n\
                                int f(int a) {\n\
                                    int b = a + g;\n\
                                    {\n\
                                        char c = 'c';\n\
                                        b = b + c;\n\
                                    }\n\
                                    return b;\n\
                                }\n\
                                int main() {\n\
                                    return f(g);\n\
                                }\n");
    let xref = checked.cross_reference();

    let names: Vec<&str> = xref.routines().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["xref", "f", "main"]);

    let g = xref.lookup("xref", "g").unwrap();
    assert_eq!((g.kind, g.level, g.ty), (SymbolKind::Variable, 0, Type::Int));
    assert_eq!(g.lines, [2, 4, 12]);

    let f = xref.lookup("xref", "f").unwrap();
    assert_eq!(f.kind, SymbolKind::Function);
    assert_eq!(f.lines, [3, 12]);

    let a = xref.lookup("f", "a").unwrap();
    assert_eq!((a.kind, a.level), (SymbolKind::Parameter, 1));
    assert_eq!(xref.lookup("f", "b").unwrap().lines, [4, 7, 7, 9]);

    let c = xref.lookup("f", "c").unwrap();
    assert_eq!((c.kind, c.level, c.ty), (SymbolKind::Variable, 2, Type::Char));

    assert!(xref.lookup("main", "g").is_none());

    let listing = xref.to_string();
    assert!(listing.starts_with("===== CROSS-REFERENCE TABLE ====="));
    assert!(listing.contains("*** PROGRAM xref ***"));
    assert!(listing.contains("*** FUNCTION f ***"));
}
