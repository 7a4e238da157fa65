// Parser module: Converts a list of tokens into an abstract syntax tree (AST)
//
// Module organization:
// - parser.rs: Core Parser struct, token cursor and the declaration arena
// - types.rs: Type-name parsing (`float` resolves to `double`)
// - expressions.rs: Expression parsing with precedence climbing
// - statements.rs: Statement parsing (if, while, jumps, blocks)
// - declarations.rs: Variable and function definitions

mod parser;
mod types;
mod expressions;
mod statements;
mod declarations;

use model::{ParseError, Program, Token};
use parser::Parser;
use tracing::debug;

/// Parse a list of tokens into a Program AST
///
/// # Arguments
/// * `tokens` - Slice of tokens from the lexer, terminated by `Token::End`
///
/// # Returns
/// * `Ok(Program)` - Top-level definitions plus the arena that owns them
/// * `Err(ParseError)` - The first unexpected token; parsing does not recover
pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    let program = Parser::new(tokens).parse_program()?;
    debug!(
        items = program.items.len(),
        declarations = program.declarations.len(),
        "parsed program"
    );
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexer::lex;
    use model::{BinaryOp, Block, Declaration, Expr, FuncDef, Jump, JumpKind, SignOp, StepOp, Stmt, Type};

    fn parse(src: &str) -> Result<Program, ParseError> {
        let tokens = lex(src).unwrap();
        parse_tokens(&tokens)
    }

    fn main_body(program: &Program) -> &Block {
        let main = program
            .items
            .iter()
            .filter_map(|id| program.func(*id))
            .find(|f| f.name == "main")
            .expect("main should be defined");
        &main.body
    }

    /// Expression of the first statement of main
    fn first_expr(src: &str) -> Expr {
        let program = parse(&format!("int main() {{ {src}; }}")).unwrap();
        match &main_body(&program).statements[0] {
            Stmt::Expr(expr) => expr.clone(),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn int(value: i32) -> Expr {
        Expr::IntLiteral(value)
    }

    fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    #[test]
    fn parse_simple_main() {
        let program = parse("int main() { return 0; }").unwrap();
        assert_eq!(program.items.len(), 1);
        let main = program.func(program.items[0]).unwrap();
        assert_eq!(main.name, "main");
        assert_eq!(main.return_type, Type::Int);
        assert!(main.params.is_empty());
        assert_eq!(
            main.body.statements,
            vec![Stmt::Jump(Jump { kind: JumpKind::Return, value: Some(int(0)) })]
        );
    }

    #[test]
    fn parse_global_variable() {
        let program = parse("const double pi = 3.14; int main() { return 0; }").unwrap();
        assert_eq!(program.items.len(), 2);
        let pi = program.var(program.items[0]).unwrap();
        assert_eq!(pi.name, "pi");
        assert_eq!(pi.r#type, Type::Double);
        assert!(pi.is_const);
        assert_eq!(pi.init, Some(Expr::DoubleLiteral(3.14)));
    }

    #[test]
    fn parse_variable_without_initializer_still_needs_semicolon() {
        let program = parse("int x; int main() { return 0; }").unwrap();
        assert_eq!(program.var(program.items[0]).unwrap().init, None);

        let err = parse("int x int main() { return 0; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected { expected: "';'".to_string(), found: Token::Int }
        );
    }

    #[test]
    fn parse_function_params_live_in_arena() {
        let program = parse("int add(int a, const double b) { return a; }").unwrap();
        let FuncDef { params, .. } = program.func(program.items[0]).unwrap();
        assert_eq!(params.len(), 2);

        let a = program.var(params[0]).unwrap();
        assert_eq!((a.name.as_str(), a.r#type, a.is_const), ("a", Type::Int, false));
        let b = program.var(params[1]).unwrap();
        assert_eq!((b.name.as_str(), b.r#type, b.is_const), ("b", Type::Double, true));
    }

    #[test]
    fn parse_float_is_double() {
        let program = parse("float f = 1.0; int main() { return 0; }").unwrap();
        assert_eq!(program.var(program.items[0]).unwrap().r#type, Type::Double);
    }

    #[test]
    fn parse_const_function_rejected() {
        let err = parse("const int f() { return 1; }").unwrap_err();
        assert_eq!(err, ParseError::ConstFunction("f".to_string()));
    }

    #[test]
    fn parse_nested_declarations() {
        let program = parse("int main() { int x = 1; void g() { return; } return x; }").unwrap();
        let stmts = &main_body(&program).statements;
        assert_eq!(stmts.len(), 3);
        assert!(matches!(stmts[0], Stmt::VarDecl(_)));
        let Stmt::FuncDecl(id) = stmts[1] else {
            panic!("expected nested function");
        };
        assert!(matches!(program.declaration(id), Declaration::Func(f) if f.name == "g"));
        assert_eq!(
            stmts[2],
            Stmt::Jump(Jump { kind: JumpKind::Return, value: Some(ident("x")) })
        );
    }

    // ─── Expression tests ──────────────────────────────────────
    #[test]
    fn parse_multiplication_binds_tighter() {
        assert_eq!(
            first_expr("1+2*3"),
            binary(BinaryOp::Add, int(1), binary(BinaryOp::Mul, int(2), int(3)))
        );
        assert_eq!(
            first_expr("1*2+3"),
            binary(BinaryOp::Add, binary(BinaryOp::Mul, int(1), int(2)), int(3))
        );
    }

    #[test]
    fn parse_equal_precedence_groups_right() {
        assert_eq!(
            first_expr("8-4-2"),
            binary(BinaryOp::Sub, int(8), binary(BinaryOp::Sub, int(4), int(2)))
        );
    }

    #[test]
    fn parse_power_binds_tightest() {
        assert_eq!(
            first_expr("2*3^2"),
            binary(BinaryOp::Mul, int(2), binary(BinaryOp::Pow, int(3), int(2)))
        );
    }

    #[test]
    fn parse_assignment_binds_loosest() {
        assert_eq!(
            first_expr("x = y < 3"),
            binary(BinaryOp::Assign, ident("x"), binary(BinaryOp::Less, ident("y"), int(3)))
        );
        assert_eq!(
            first_expr("x += 2"),
            binary(BinaryOp::AddAssign, ident("x"), int(2))
        );
    }

    #[test]
    fn parse_chained_assignment_is_syntactically_valid() {
        assert_eq!(
            first_expr("a = b = 1"),
            binary(BinaryOp::Assign, ident("a"), binary(BinaryOp::Assign, ident("b"), int(1)))
        );
    }

    #[test]
    fn parse_parentheses() {
        assert_eq!(
            first_expr("(1+2)*3"),
            binary(
                BinaryOp::Mul,
                Expr::Paren(Box::new(binary(BinaryOp::Add, int(1), int(2)))),
                int(3)
            )
        );
    }

    #[test]
    fn parse_unary_sign() {
        assert_eq!(
            first_expr("-x + 1"),
            binary(
                BinaryOp::Add,
                Expr::Unary { op: SignOp::Minus, operand: Box::new(ident("x")) },
                int(1)
            )
        );
    }

    #[test]
    fn parse_prefix_and_postfix() {
        assert_eq!(
            first_expr("++i"),
            Expr::Prefix { op: StepOp::Increment, operand: Box::new(ident("i")) }
        );
        assert_eq!(
            first_expr("i--"),
            Expr::Postfix { op: StepOp::Decrement, operand: Box::new(ident("i")) }
        );
    }

    #[test]
    fn parse_prefix_requires_identifier() {
        let err = parse("int main() { ++1; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected {
                expected: "identifier".to_string(),
                found: Token::IntLiteral { value: "1".to_string() },
            }
        );
    }

    #[test]
    fn parse_call_with_expression_args() {
        assert_eq!(
            first_expr("f(a + 1, g(), 'c')"),
            Expr::Call {
                name: "f".to_string(),
                args: vec![
                    binary(BinaryOp::Add, ident("a"), int(1)),
                    Expr::Call { name: "g".to_string(), args: vec![] },
                    Expr::CharLiteral(b'c'),
                ],
            }
        );
    }

    #[test]
    fn parse_int_literal_out_of_range() {
        let err = parse("int x = 99999999999; int main() { return 0; }").unwrap_err();
        assert_eq!(err, ParseError::InvalidLiteral("99999999999".to_string()));
    }

    #[test]
    fn parse_most_negative_int_literal() {
        assert_eq!(first_expr("-2147483648"), int(i32::MIN));
        assert_eq!(first_expr("-5"), Expr::Unary { op: SignOp::Minus, operand: Box::new(int(5)) });

        let err = parse("int x = -2147483649; int main() { return 0; }").unwrap_err();
        assert_eq!(err, ParseError::InvalidLiteral("2147483649".to_string()));
    }

    // ─── Statement tests ───────────────────────────────────────
    #[test]
    fn parse_else_if_chain() {
        let src = "int main() { if (x < 1) { x = 1; } else if (x < 2) { x = 2; } else { x = 3; } }";
        let program = parse(src).unwrap();
        let Stmt::If { else_branch: Some(else_branch), .. } = &main_body(&program).statements[0] else {
            panic!("expected if with else");
        };
        let Stmt::If { else_branch: Some(last), .. } = else_branch.as_ref() else {
            panic!("expected else-if");
        };
        assert!(matches!(last.as_ref(), Stmt::Block(b) if b.statements.len() == 1));
    }

    #[test]
    fn parse_while_loop() {
        let program = parse("int main() { while (i < 10) { i++; break; continue; } }").unwrap();
        let Stmt::While { cond, body } = &main_body(&program).statements[0] else {
            panic!("expected while");
        };
        assert_eq!(*cond, binary(BinaryOp::Less, ident("i"), int(10)));
        assert_eq!(body.statements.len(), 3);
        assert_eq!(body.statements[1], Stmt::Jump(Jump { kind: JumpKind::Break, value: None }));
        assert_eq!(body.statements[2], Stmt::Jump(Jump { kind: JumpKind::Continue, value: None }));
    }

    #[test]
    fn parse_if_body_must_be_block() {
        let err = parse("int main() { if (x) return 1; }").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected { expected: "'{'".to_string(), found: Token::Return }
        );
    }

    #[test]
    fn parse_empty_return() {
        let program = parse("void main() { return; }").unwrap();
        assert_eq!(
            main_body(&program).statements[0],
            Stmt::Jump(Jump { kind: JumpKind::Return, value: None })
        );
    }

    #[test]
    fn parse_nested_block() {
        let program = parse("int main() { { int x = 1; } }").unwrap();
        assert!(matches!(&main_body(&program).statements[0], Stmt::Block(b) if b.statements.len() == 1));
    }

    // ─── Rejected input ────────────────────────────────────────
    #[test]
    fn parse_top_level_must_be_definition() {
        let err = parse("x = 1;").unwrap_err();
        assert!(matches!(err, ParseError::Expected { ref expected, .. } if expected == "type name"));
    }

    #[test]
    fn parse_reserved_tokens_rejected() {
        assert_eq!(
            parse("int main() { for (;;) { } }").unwrap_err(),
            ParseError::UnexpectedToken(Token::For)
        );
        assert_eq!(
            parse("int main() { bool b = !true; }").unwrap_err(),
            ParseError::UnexpectedToken(Token::Bang)
        );
        assert_eq!(
            parse("int main() { bool b = x && y; }").unwrap_err(),
            ParseError::Expected { expected: "';'".to_string(), found: Token::AndAnd }
        );
    }

    #[test]
    fn parse_missing_brace_reports_end() {
        let err = parse("int main() { return 0;").unwrap_err();
        assert_eq!(
            err,
            ParseError::Expected { expected: "'}'".to_string(), found: Token::End }
        );
    }
}
