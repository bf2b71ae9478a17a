use subc::{
    ast::{
        BinaryOperator, Block, CaseLabel, Expr, ForInit, Item, LiteralValue, Program, Statement,
        Type, UnaryOperator, VarDecl,
    },
    error::{Error, SyntaxError},
    parse_source,
    util::position::Position,
};

fn parse_ok(src: &str) -> Program {
    parse_source(src).unwrap_or_else(|e| panic!("Parsing failed: {e}\n{src}"))
}

fn syntax_error(src: &str) -> SyntaxError {
    match parse_source(src) {
        Err(Error::Syntax(e)) => e,
        Err(e) => panic!("Expected a syntax error, got: {e}"),
        Ok(_) => panic!("Parsing succeeded but was expected to fail:\n{src}"),
    }
}

/// Wraps `body` in a `main` function and returns its statements.
fn main_body(body: &str) -> Vec<Statement> {
    let program = parse_ok(&format!("Program t;\nint main() {{\n{body}\n}}"));
    program.function("main")
           .map(|main| main.body.statements.clone())
           .unwrap_or_else(|| panic!("main is missing"))
}

/// Parses `expr` as the value of a return statement.
fn expression(expr: &str) -> Expr {
    match main_body(&format!("return {expr};")).remove(0) {
        Statement::Return { value: Some(value), .. } => value,
        other => panic!("Expected a return statement, got {other:?}"),
    }
}

#[test]
fn header_and_items() {
    let program = parse_ok("Program demo;\nint g = 3;\nchar c;\nvoid f(int a, string s) { }\nint main() { return g; }");

    assert_eq!(program.name, "demo");
    assert_eq!(program.items.len(), 4);
    assert_eq!(program.globals().map(|g| g.name.as_str()).collect::<Vec<_>>(), ["g", "c"]);

    let f = program.function("f").unwrap();
    assert_eq!(f.return_type, Type::Void);
    assert_eq!(f.params.iter().map(|p| (p.name.as_str(), p.ty)).collect::<Vec<_>>(),
               [("a", Type::Int), ("s", Type::String)]);
    assert_eq!(f.position, Position::new(4, 1));

    let Item::Global(c) = &program.items[1] else { panic!("expected a global") };
    assert_eq!(c.ty, Type::Char);
    assert!(c.initializer.is_none());
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expression("1 + 2 * 3").to_string(), "1 + 2 * 3");

    let Expr::BinaryOp { op, right, .. } = expression("1 + 2 * 3") else {
        panic!("expected a binary operation")
    };
    assert_eq!(op, BinaryOperator::Add);
    assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
}

#[test]
fn operators_are_left_associative() {
    let Expr::BinaryOp { left, op, .. } = expression("10 - 4 - 3") else {
        panic!("expected a binary operation")
    };
    assert_eq!(op, BinaryOperator::Sub);
    assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
}

#[test]
fn precedence_ladder() {
    let expr = expression("a || b && c == d < e + f * -g");

    assert_eq!(expr.to_string(), "a || b && c == d < e + f * -g");
    let Expr::BinaryOp { op, right, .. } = expr else { panic!("expected a binary operation") };
    assert_eq!(op, BinaryOperator::Or);
    assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::And, .. }));

    assert_eq!(expression("(a || b) && c").to_string(), "(a || b) && c");
    assert_eq!(expression("!(a < b)").to_string(), "!(a < b)");
}

#[test]
fn unary_operators_nest() {
    let Expr::UnaryOp { op, expr, .. } = expression("!-x") else {
        panic!("expected a unary operation")
    };
    assert_eq!(op, UnaryOperator::Not);
    assert!(matches!(*expr, Expr::UnaryOp { op: UnaryOperator::Negate, .. }));
}

#[test]
fn assignment_is_right_associative() {
    let statements = main_body("a = b = 1;");
    let Statement::Expression { expr: Expr::Assignment { name, value, .. }, .. } = &statements[0]
    else {
        panic!("expected an assignment")
    };

    assert_eq!(name, "a");
    assert!(matches!(**value, Expr::Assignment { ref name, .. } if name == "b"));
}

#[test]
fn calls_take_any_expressions() {
    let Expr::Call { name, arguments, .. } = expression("max(1, f(2), 'c', \"s\")") else {
        panic!("expected a call")
    };

    assert_eq!(name, "max");
    assert_eq!(arguments.len(), 4);
    assert!(matches!(arguments[1], Expr::Call { .. }));
    assert!(matches!(arguments[2],
                     Expr::Literal { value: LiteralValue::Char(b'c'),
                                     .. }));
    assert!(matches!(expression("f()"), Expr::Call { ref arguments, .. } if arguments.is_empty()));
}

#[test]
fn else_binds_to_the_nearest_if() {
    let statements = main_body("if (a) if (b) x = 1; else x = 2;");
    let Statement::If { then_branch,
                        else_branch,
                        .. } = &statements[0]
    else {
        panic!("expected an if statement")
    };

    assert!(else_branch.is_none());
    assert!(matches!(**then_branch, Statement::If { else_branch: Some(_), .. }));
}

#[test]
fn for_loop_clauses_are_optional() {
    let statements = main_body("for (int i = 0; i < 3; i = i + 1) { }\nfor (i = 0; ; ) { break; }\nfor (;;) break;");

    assert!(matches!(&statements[0],
                     Statement::For { init: Some(ForInit::Declaration(_)),
                                      condition: Some(_),
                                      step: Some(_),
                                      .. }));
    assert!(matches!(&statements[1],
                     Statement::For { init: Some(ForInit::Expression(_)),
                                      condition: None,
                                      step: None,
                                      .. }));
    assert!(matches!(&statements[2],
                     Statement::For { init: None,
                                      condition: None,
                                      step: None,
                                      .. }));
}

#[test]
fn switch_groups_statements_by_label() {
    let statements = main_body("switch (c) {\ncase 'a':\ncase -1:\n x = 1;\n break;\ndefault:\n x = 2;\n}");
    let Statement::Switch { cases, .. } = &statements[0] else { panic!("expected a switch") };

    let labels: Vec<Option<CaseLabel>> = cases.iter().map(|case| case.label).collect();
    assert_eq!(labels, [Some(CaseLabel::Char(b'a')), Some(CaseLabel::Integer(-1)), None]);
    assert!(cases[0].statements.is_empty());
    assert_eq!(cases[1].statements.len(), 2);
    assert_eq!(cases[2].statements.len(), 1);
}

#[test]
fn declarations_need_a_block() {
    assert!(matches!(syntax_error("Program p; int main() { if (1) int x = 1; }"),
                     SyntaxError::DeclarationNotAllowed { .. }));
    assert!(matches!(syntax_error("Program p; int main() { switch (1) { case 1: int x; } }"),
                     SyntaxError::DeclarationNotAllowed { .. }));

    assert!(parse_source("Program p; int main() { if (1) { int x = 1; } }").is_ok());
}

#[test]
fn only_variables_can_be_assigned() {
    assert_eq!(syntax_error("Program p; int main() { 1 = x; }"),
               SyntaxError::InvalidAssignmentTarget { position: Position::new(1, 27) });
    assert!(matches!(syntax_error("Program p; int main() { f() = 2; }"),
                     SyntaxError::InvalidAssignmentTarget { .. }));
}

#[test]
fn missing_pieces_are_reported() {
    assert!(matches!(syntax_error("int main() { }"), SyntaxError::UnexpectedToken { .. }));
    assert!(matches!(syntax_error("Program p; int main() { return 1 }"),
                     SyntaxError::UnexpectedToken { .. }));
    assert!(matches!(syntax_error("Program p; int main() { return 1;"),
                     SyntaxError::UnexpectedEndOfInput { .. }));
    assert!(matches!(syntax_error("Program p; int main() { x = (1 + 2; }"),
                     SyntaxError::UnexpectedToken { .. }));
    assert!(matches!(syntax_error("Program p; int main() { switch (x) { case y: break; } }"),
                     SyntaxError::UnexpectedToken { .. }));
}

/// Resets every position in `program` so that trees parsed from differently
/// laid out sources compare equal when their structure is.
fn erase_positions(mut program: Program) -> Program {
    program.position = Position::default();
    for item in &mut program.items {
        match item {
            Item::Global(decl) => erase_var_decl(decl),
            Item::Function(function) => {
                function.position = Position::default();
                for param in &mut function.params {
                    param.position = Position::default();
                }
                erase_block(&mut function.body);
            },
        }
    }
    program
}

fn erase_var_decl(decl: &mut VarDecl) {
    decl.position = Position::default();
    if let Some(initializer) = &mut decl.initializer {
        erase_expr(initializer);
    }
}

fn erase_block(block: &mut Block) {
    block.position = Position::default();
    block.statements.iter_mut().for_each(erase_statement);
}

fn erase_statement(statement: &mut Statement) {
    match statement {
        Statement::VariableDeclaration(decl) => erase_var_decl(decl),
        Statement::Block(block) => erase_block(block),
        Statement::Expression { expr, position } => {
            *position = Position::default();
            erase_expr(expr);
        },
        Statement::If { condition,
                        then_branch,
                        else_branch,
                        position, } => {
            *position = Position::default();
            erase_expr(condition);
            erase_statement(then_branch);
            if let Some(else_branch) = else_branch {
                erase_statement(else_branch);
            }
        },
        Statement::While { condition,
                           body,
                           position, } => {
            *position = Position::default();
            erase_expr(condition);
            erase_statement(body);
        },
        Statement::For { init,
                         condition,
                         step,
                         body,
                         position, } => {
            *position = Position::default();
            match init {
                Some(ForInit::Declaration(decl)) => erase_var_decl(decl),
                Some(ForInit::Expression(expr)) => erase_expr(expr),
                None => {},
            }
            condition.iter_mut().chain(step.iter_mut()).for_each(erase_expr);
            erase_statement(body);
        },
        Statement::Switch { scrutinee,
                            cases,
                            position, } => {
            *position = Position::default();
            erase_expr(scrutinee);
            for case in cases {
                case.position = Position::default();
                case.statements.iter_mut().for_each(erase_statement);
            }
        },
        Statement::Return { value, position } => {
            *position = Position::default();
            value.iter_mut().for_each(erase_expr);
        },
        Statement::Break { position } => *position = Position::default(),
    }
}

fn erase_expr(expr: &mut Expr) {
    match expr {
        Expr::Literal { position, .. } | Expr::Identifier { position, .. } => {
            *position = Position::default();
        },
        Expr::Assignment { value, position, .. } => {
            *position = Position::default();
            erase_expr(value);
        },
        Expr::UnaryOp { expr, position, .. } => {
            *position = Position::default();
            erase_expr(expr);
        },
        Expr::BinaryOp { left,
                         right,
                         position,
                         .. } => {
            *position = Position::default();
            erase_expr(left);
            erase_expr(right);
        },
        Expr::Call { arguments,
                     position,
                     .. } => {
            *position = Position::default();
            arguments.iter_mut().for_each(erase_expr);
        },
    }
}

/// Parses `src`, prints it, parses the printed text and checks that both
/// trees have the same structure.
fn assert_round_trip(src: &str) -> String {
    let original = parse_ok(src);
    let printed = original.to_string();
    let reparsed = parse_ok(&printed);

    assert_eq!(erase_positions(reparsed),
               erase_positions(original),
               "printed form changed the tree:\n{printed}");
    printed
}

#[test]
fn printed_program_parses_back_to_the_same_tree() {
    let src = r#"
        Program roundtrip;
        int total = 1 + 2 * 3;
        string greeting = "hi\n";
        int sum(int a, int b) { return a + b; }
        void main() {
            int i;
            for (i = 0; i < 3; i = i + 1)
                if (i == 1) print("one\n"); else if (i == 2) { print("two\n"); } else print("%d\n", i);
            while (!(total > 10 || total < 0)) total = total - -1;
            switch (total % 3) {
                case 0: print("zero"); break;
                case -1:
                case 'x':
                default: { char c = '\''; }
            }
            return;
        }
    "#;

    let printed = assert_round_trip(src);
    assert!(printed.starts_with("Program roundtrip;\n"));
}

#[test]
fn printing_keeps_grouping_and_nesting() {
    let printed = assert_round_trip(r#"
        Program shapes;
        int main() {
            int x;
            int y;
            x = (1 + 2) * 3;
            x = 10 - (4 - 3);
            x = (y = 2) + 1;
            x = y = 5;
            x = !-!y;
            x = - -y;
            x = -(y + 1) * f(x = 1, (2 || 3) && 4);
            if (x) if (y) x = 1; else x = 2;
            if (x) { if (y) x = 1; } else x = 2;
            if (x < 0) x = 0; else if (x < 10) x = 1; else if (x < 100) x = 2; else x = 3;
            switch (-x) { case -5: case -9223372036854775807: break; default: }
        }
        int f(int a, int b) { return a; }
    "#);

    assert!(printed.contains("x = (1 + 2) * 3;"), "{printed}");
    assert!(printed.contains("x = 10 - (4 - 3);"), "{printed}");
    assert!(printed.contains("x = (y = 2) + 1;"), "{printed}");
}
