use ayla_syntax::ast::{Binding, Stmt};
use ayla_syntax::parse;
use rstest::rstest;

#[rstest]
#[case::typed_egg("egg count int = 3", Binding::Egg, 1)]
#[case::constant("rock PI = 3.14", Binding::Rock, 1)]
#[case::short("a, b := 1", Binding::Short, 2)]
#[case::multi_egg("egg x, y, z float", Binding::Egg, 3)]
fn given_a_declaration_when_parsed_then_binding_and_names_are_kept(
    #[case] source: &str,
    #[case] binding: Binding,
    #[case] names: usize,
) {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "{errors:?}");
    match &program.statements[..] {
        [Stmt::Var(decl)] => {
            assert_eq!(decl.binding, binding);
            assert_eq!(decl.names.len(), names);
        }
        other => panic!("expected one declaration, got {other:?}"),
    }
}

#[test]
fn given_a_whole_program_when_parsed_then_every_statement_is_kept() {
    let source = "\
type Point struct {
  x int
  y int
}

fun norm(p Point) int {
  return p.x * p.x + p.y * p.y
}

egg points []Point
for i := 0; i < 3; i = i + 1 {
  spawn {
    print(norm(points[i]))
  }
}
";
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(program.statements.len(), 4);
    assert!(matches!(program.statements[0], Stmt::Type(_)));
    assert!(matches!(program.statements[1], Stmt::Func(_)));
    assert!(matches!(program.statements[3], Stmt::For(_)));
}

#[test]
fn given_identifier_positions_when_parsed_then_columns_point_past_the_name() {
    let (program, _) = parse("egg count int = 1\n  total := count");
    let Stmt::Var(first) = &program.statements[0] else {
        panic!("declaration expected");
    };
    let count = &first.names[0];
    assert_eq!((count.pos.line, count.pos.column), (1, 10));
    assert_eq!(count.width(), 5);

    let Stmt::Var(second) = &program.statements[1] else {
        panic!("declaration expected");
    };
    assert_eq!((second.names[0].pos.line, second.names[0].pos.column), (2, 8));
}

#[rstest]
#[case::missing_name("egg 123 = 4", "123")]
#[case::stray_brace("}", "}")]
#[case::unclosed_body("fun f() {\n  x := 1\n", "")]
fn given_broken_source_when_parsed_then_the_offending_token_is_reported(
    #[case] source: &str,
    #[case] token: &str,
) {
    let (_, errors) = parse(source);
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].token, token);
    assert!(errors[0].line >= 1 && errors[0].column >= 1);
}

#[test]
fn given_several_broken_lines_when_parsed_then_valid_statements_survive() {
    let (program, errors) = parse("egg = 1\nok := 2\nrock 5\nfine := ok");
    assert_eq!(errors.len(), 2, "{errors:?}");
    assert_eq!(program.statements.len(), 2);
}
