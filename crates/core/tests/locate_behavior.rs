use ayla_core::locate::locate;
use ayla_core::{Position, Range};
use ayla_syntax::lexer::tokenize;
use ayla_syntax::parse;
use ayla_syntax::token::TokenKind;

const PROGRAM: &str = "\
type Point struct {
  x int
  y []float
}

fun scale(p Point, k int) Point {
  return Point{x: p.x * k, y: p.y}
}

egg origin Point = Point{x: 0, y: [0.0]}
egg pair struct { left int, right int }
rock limit = 3
total := 0
for i := 0; i < limit; i = i + 1 {
  if i > 1 {
    total = total + scale(origin, i).x
  } else {
    origin.x = i
  }
}
while total > 0 {
  total = total - 1
}
spawn {
  report(total, origin.y[0], -limit)
}
";

#[test]
fn given_every_identifier_token_when_located_at_each_column_then_finds_that_identifier() {
    let (program, errors) = parse(PROGRAM);
    assert!(errors.is_empty(), "{errors:?}");

    let idents: Vec<_> = tokenize(PROGRAM)
        .into_iter()
        .filter(|token| token.kind == TokenKind::Ident)
        .collect();
    assert!(idents.len() > 40);

    for token in idents {
        let line = token.line - 1;
        let span = Range::new(
            Position::new(line, token.start_column() - 1),
            Position::new(line, token.column - 1),
        );
        for character in span.start.character..span.end.character {
            let at = Position::new(line, character);
            let found = locate(&program, at)
                .unwrap_or_else(|| panic!("`{}` not found at {at:?}", token.literal));
            assert_eq!(found.range(), span, "`{}` at {at:?}", token.literal);
        }
    }
}

#[test]
fn given_whitespace_between_tokens_when_located_then_finds_nothing() {
    let (program, _) = parse(PROGRAM);
    for (line, text) in PROGRAM.lines().enumerate() {
        for (character, ch) in text.char_indices() {
            if ch == ' ' {
                let at = Position::new(line as u32, character as u32);
                assert!(locate(&program, at).is_none(), "something found at {at:?}");
            }
        }
    }
}

#[test]
fn given_positions_past_the_end_of_each_line_when_located_then_finds_nothing() {
    let (program, _) = parse(PROGRAM);
    for (line, text) in PROGRAM.lines().enumerate() {
        let at = Position::new(line as u32, text.len() as u32);
        assert!(locate(&program, at).is_none(), "something found at {at:?}");
    }
}
