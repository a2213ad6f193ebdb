use std::{fmt, str::FromStr};

use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::facelets::{FACELET_COUNT, Face, FaceletState};

/// A layer that can be turned: one of the six outer faces or the middle
/// slice between `L` and `R`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    U,
    R,
    F,
    D,
    L,
    B,
    M,
}

impl Layer {
    pub const ALL: [Self; 7] = {
        use Layer::*;
        let v = [U, R, F, D, L, B, M];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub fn letter(self) -> char {
        match self.face() {
            Some(face) => face.letter(),
            None => 'M',
        }
    }

    pub fn from_letter(letter: char) -> Option<Layer> {
        Layer::ALL.into_iter().find(|layer| layer.letter() == letter)
    }

    /// The face this layer turns, or `None` for the middle slice.
    pub fn face(self) -> Option<Face> {
        match self {
            Layer::M => None,
            face => Some(Face::ALL[face as usize]),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub fn inverse(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Direction::Clockwise => "",
            Direction::CounterClockwise => "'",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown move notation: {0:?}")]
pub struct InvalidMove(pub String);

/// A quarter turn of a single layer. Clockwise is judged looking at the
/// turned face; `M` turns in the same direction as `L`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    pub layer: Layer,
    pub direction: Direction,
}

impl Move {
    pub const ALL: [Move; 14] = {
        let mut v = [Move::clockwise(Layer::U); 14];

        let mut i = 0;
        while i < Layer::ALL.len() {
            v[2 * i] = Move::clockwise(Layer::ALL[i]);
            v[2 * i + 1] = Move::counter_clockwise(Layer::ALL[i]);
            i += 1;
        }

        v
    };

    pub const fn new(layer: Layer, direction: Direction) -> Move {
        Move { layer, direction }
    }

    pub const fn clockwise(layer: Layer) -> Move {
        Move::new(layer, Direction::Clockwise)
    }

    pub const fn counter_clockwise(layer: Layer) -> Move {
        Move::new(layer, Direction::CounterClockwise)
    }

    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Move {
        Move::new(self.layer, self.direction.inverse())
    }

    /// For every destination facelet, the index of the facelet whose sticker
    /// lands there.
    pub fn table(self) -> &'static [u8; FACELET_COUNT] {
        &TABLES[self.layer as usize][self.direction as usize]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.layer.letter(), self.direction.suffix())
    }
}

impl FromStr for Move {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();

        let layer = chars
            .next()
            .and_then(Layer::from_letter)
            .ok_or_else(|| InvalidMove(s.to_owned()))?;

        let direction = match chars.as_str() {
            "" => Direction::Clockwise,
            "'" => Direction::CounterClockwise,
            _ => return Err(InvalidMove(s.to_owned())),
        };

        Ok(Move::new(layer, direction))
    }
}

impl From<Move> for String {
    fn from(value: Move) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = InvalidMove;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// Each cycle `[a, b, c, d]` sends the sticker at `a` to `b`, `b` to `c`, `c`
// to `d` and `d` back to `a` during a clockwise quarter turn. Face turns have
// three cycles over the bordering strips followed by the corner and edge
// cycles of the face itself; the center never moves.
const CYCLES: [&[[u8; 4]]; 7] = [
    // U
    &[
        [18, 36, 45, 9],
        [19, 37, 46, 10],
        [20, 38, 47, 11],
        [0, 2, 8, 6],
        [1, 5, 7, 3],
    ],
    // R
    &[
        [20, 2, 51, 29],
        [23, 5, 48, 32],
        [26, 8, 45, 35],
        [9, 11, 17, 15],
        [10, 14, 16, 12],
    ],
    // F
    &[
        [6, 9, 29, 44],
        [7, 12, 28, 41],
        [8, 15, 27, 38],
        [18, 20, 26, 24],
        [19, 23, 25, 21],
    ],
    // D
    &[
        [24, 15, 51, 42],
        [25, 16, 52, 43],
        [26, 17, 53, 44],
        [27, 29, 35, 33],
        [28, 32, 34, 30],
    ],
    // L
    &[
        [0, 18, 27, 53],
        [3, 21, 30, 50],
        [6, 24, 33, 47],
        [36, 38, 44, 42],
        [37, 41, 43, 39],
    ],
    // B
    &[
        [2, 36, 33, 17],
        [1, 39, 34, 14],
        [0, 42, 35, 11],
        [45, 47, 53, 51],
        [46, 50, 52, 48],
    ],
    // M, which carries the centers of U, F, D and B along with it. It brings
    // the F middle column up onto U.
    &[[1, 52, 28, 19], [4, 49, 31, 22], [7, 46, 34, 25]],
];

const fn table_from_cycles(cycles: &[[u8; 4]]) -> [u8; FACELET_COUNT] {
    let mut table = [0; FACELET_COUNT];

    let mut i = 0;
    while i < FACELET_COUNT {
        table[i] = i as u8;
        i += 1;
    }

    let mut c = 0;
    while c < cycles.len() {
        let cycle = cycles[c];

        let mut j = 0;
        while j < cycle.len() {
            table[cycle[(j + 1) % cycle.len()] as usize] = cycle[j];
            j += 1;
        }

        c += 1;
    }

    table
}

const fn inverse_table(table: &[u8; FACELET_COUNT]) -> [u8; FACELET_COUNT] {
    let mut inverse = [0; FACELET_COUNT];

    let mut i = 0;
    while i < FACELET_COUNT {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }

    inverse
}

/// Indexed by `[Layer as usize][Direction as usize]`.
static TABLES: [[[u8; FACELET_COUNT]; 2]; 7] = {
    let mut tables = [[[0; FACELET_COUNT]; 2]; 7];

    let mut i = 0;
    while i < CYCLES.len() {
        let clockwise = table_from_cycles(CYCLES[i]);
        tables[i][Direction::CounterClockwise as usize] = inverse_table(&clockwise);
        tables[i][Direction::Clockwise as usize] = clockwise;
        i += 1;
    }

    tables
};

impl FaceletState {
    /// Perform a quarter turn in place.
    pub fn apply(&mut self, mv: Move) {
        let table = mv.table();
        let before = *self.facelets();

        for (facelet, &source) in self.facelets_mut().iter_mut().zip(table) {
            *facelet = before[source as usize];
        }

        trace!(target: "move_engine", "Applied {mv}");
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Parse a single move identifier such as `R` or `M'` and apply it. The
    /// state is untouched if the identifier is not recognized.
    ///
    /// # Errors
    ///
    /// If `notation` does not name one of the fourteen quarter turns
    pub fn apply_notation(&mut self, notation: &str) -> Result<Move, InvalidMove> {
        let mv = notation.parse()?;
        self.apply(mv);
        Ok(mv)
    }

    /// The solved cube after `moves`.
    pub fn after(moves: &[Move]) -> FaceletState {
        let mut state = FaceletState::solved();
        state.apply_all(moves);
        state
    }
}
