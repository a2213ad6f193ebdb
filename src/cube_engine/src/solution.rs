//! Parsing of solver output such as `R U2 F' D` into tokens that can be
//! replayed one at a time.

use std::{fmt, iter};

use serde::Serialize;
use thiserror::Error;

use crate::moves::{Direction, Layer, Move};

/// One step of a solution. A `Double` is the same quarter turn performed
/// twice; a driver may show it as a single half turn or as two quarter turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "TokenRepr")]
pub enum SolutionToken {
    Single(Move),
    Double(Move),
}

impl SolutionToken {
    /// The quarter turn this token is made of.
    pub fn base_move(self) -> Move {
        match self {
            SolutionToken::Single(mv) | SolutionToken::Double(mv) => mv,
        }
    }

    pub fn is_double(self) -> bool {
        matches!(self, SolutionToken::Double(_))
    }

    /// The quarter turns to apply, in order.
    pub fn quarter_turns(self) -> impl Iterator<Item = Move> {
        let count = if self.is_double() { 2 } else { 1 };
        iter::repeat_n(self.base_move(), count)
    }

    /// The token that undoes this one.
    #[must_use]
    pub fn inverse(self) -> SolutionToken {
        match self {
            SolutionToken::Single(mv) => SolutionToken::Single(mv.inverse()),
            SolutionToken::Double(mv) => SolutionToken::Double(mv.inverse()),
        }
    }
}

impl fmt::Display for SolutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionToken::Single(mv) => write!(f, "{mv}"),
            SolutionToken::Double(mv) => {
                write!(f, "{}2{}", mv.layer.letter(), mv.direction.suffix())
            }
        }
    }
}

/// Wire shape: a single turn is its name, a double turn is the name twice,
/// e.g. `["R", ["U", "U"], "F'"]`.
#[derive(Serialize)]
#[serde(untagged)]
enum TokenRepr {
    Single(Move),
    Double([Move; 2]),
}

impl From<SolutionToken> for TokenRepr {
    fn from(value: SolutionToken) -> Self {
        match value {
            SolutionToken::Single(mv) => TokenRepr::Single(mv),
            SolutionToken::Double(mv) => TokenRepr::Double([mv, mv]),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolutionError {
    #[error("Unknown layer in solution token {token:?} at position {position}")]
    UnknownLayer { token: String, position: usize },
    #[error("Unknown turn suffix in solution token {token:?} at position {position}")]
    UnknownSuffix { token: String, position: usize },
}

fn parse_token(token: &str, position: usize) -> Result<SolutionToken, SolutionError> {
    let mut chars = token.chars();

    let Some(layer) = chars.next().and_then(Layer::from_letter) else {
        return Err(SolutionError::UnknownLayer {
            token: token.to_owned(),
            position,
        });
    };

    Ok(match chars.as_str() {
        "" => SolutionToken::Single(Move::clockwise(layer)),
        "'" => SolutionToken::Single(Move::counter_clockwise(layer)),
        "2" => SolutionToken::Double(Move::clockwise(layer)),
        "2'" => SolutionToken::Double(Move::new(layer, Direction::CounterClockwise)),
        _ => {
            return Err(SolutionError::UnknownSuffix {
                token: token.to_owned(),
                position,
            });
        }
    })
}

fn push_collapsing(tokens: &mut Vec<SolutionToken>, token: SolutionToken) {
    if let SolutionToken::Single(mv) = token {
        if tokens.last() == Some(&SolutionToken::Single(mv)) {
            tokens.pop();
            tokens.push(SolutionToken::Double(mv));
            return;
        }
    }

    tokens.push(token);
}

/// Parse a whitespace separated solution. A quarter turn immediately
/// followed by the same quarter turn becomes one `Double` token.
///
/// # Errors
///
/// If any token has an unknown layer letter or suffix. Nothing is returned
/// for the tokens before it.
pub fn parse(solution: &str) -> Result<Vec<SolutionToken>, SolutionError> {
    let mut tokens = Vec::new();

    for (position, token) in solution.split_whitespace().enumerate() {
        push_collapsing(&mut tokens, parse_token(token, position)?);
    }

    Ok(tokens)
}

/// Group a list of quarter turns the same way [`parse`] does.
pub fn compress(moves: &[Move]) -> Vec<SolutionToken> {
    let mut tokens = Vec::new();

    for &mv in moves {
        push_collapsing(&mut tokens, SolutionToken::Single(mv));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    const T_PERM: &str = "R U R' U' R' F R2 U' R' U' R U R' F'";

    #[test]
    fn parses_t_perm() {
        let tokens = parse(T_PERM).unwrap();

        assert_eq!(tokens.len(), 14);
        assert_eq!(tokens[6], SolutionToken::Double(Move::clockwise(Layer::R)));
        assert_eq!(tokens[0], SolutionToken::Single(Move::clockwise(Layer::R)));
        assert_eq!(
            tokens[13],
            SolutionToken::Single(Move::counter_clockwise(Layer::F))
        );
        assert_eq!(tokens.iter().filter(|v| v.is_double()).count(), 1);
        assert_eq!(tokens.iter().join(" "), T_PERM);
    }

    #[test]
    fn rejects_unknown_layer() {
        assert_eq!(
            parse("R X"),
            Err(SolutionError::UnknownLayer {
                token: "X".to_owned(),
                position: 1
            })
        );
        assert!(parse("R u").is_err());
    }

    #[test]
    fn rejects_unknown_suffix() {
        for bad in ["R3", "U''", "F2''", "D'2", "Rw"] {
            assert!(
                matches!(
                    parse(&format!("U {bad} R")),
                    Err(SolutionError::UnknownSuffix { position: 1, .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn collapses_repeated_quarter_turns() {
        let r = Move::clockwise(Layer::R);
        let r_prime = Move::counter_clockwise(Layer::R);

        assert_eq!(parse("R R").unwrap(), vec![SolutionToken::Double(r)]);
        assert_eq!(parse("R' R'").unwrap(), vec![SolutionToken::Double(r_prime)]);
        assert_eq!(
            parse("R R R").unwrap(),
            vec![SolutionToken::Double(r), SolutionToken::Single(r)]
        );
        assert_eq!(
            parse("R R'").unwrap(),
            vec![SolutionToken::Single(r), SolutionToken::Single(r_prime)]
        );
        assert_eq!(
            parse("R2 R").unwrap(),
            vec![SolutionToken::Double(r), SolutionToken::Single(r)]
        );
        assert_eq!(compress(&[r, r, r_prime]), parse("R2 R'").unwrap());
    }

    #[test]
    fn double_suffixes() {
        assert_eq!(
            parse("U2'").unwrap(),
            vec![SolutionToken::Double(Move::counter_clockwise(Layer::U))]
        );
        assert_eq!(
            SolutionToken::Double(Move::counter_clockwise(Layer::U)).to_string(),
            "U2'"
        );
    }

    #[test]
    fn empty_and_padded_input() {
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse("  \n ").unwrap(), vec![]);
        assert_eq!(parse("  F\tB2 \n").unwrap().len(), 2);
    }

    #[test]
    fn quarter_turn_expansion() {
        let r = Move::clockwise(Layer::R);
        assert_eq!(SolutionToken::Double(r).quarter_turns().collect_vec(), vec![r, r]);
        assert_eq!(SolutionToken::Single(r).quarter_turns().collect_vec(), vec![r]);
        assert_eq!(
            SolutionToken::Double(r).inverse(),
            SolutionToken::Double(r.inverse())
        );
    }

    #[test]
    fn serializes_like_move_lists() {
        let tokens = parse("R U2 F'").unwrap();
        assert_eq!(
            serde_json::to_string(&tokens).unwrap(),
            r#"["R",["U","U"],"F'"]"#
        );
    }
}
