use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use crate::notation;

pub const FACELET_COUNT: usize = 54;
pub const FACELETS_PER_FACE: usize = 9;

/// A face of the cube. The discriminants give the order the solver notation
/// lists the faces in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, R, F, D, L, B];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// The color this face carries when the cube is solved.
    pub fn home_color(self) -> Color {
        Color::ALL[self as usize]
    }

    /// Index of this face's first facelet in the flat layout.
    pub fn offset(self) -> usize {
        self as usize * FACELETS_PER_FACE
    }
}

/// The color of a single sticker.
///
/// Each color is labelled in the solver notation by the face it belongs to on
/// a solved cube: white is `U`, red `R`, green `F`, yellow `D`, orange `L`
/// and blue `B`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    pub const ALL: [Self; 6] = {
        use Color::*;
        let v = [White, Red, Green, Yellow, Orange, Blue];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub fn home_face(self) -> Face {
        Face::ALL[self as usize]
    }
}

/// The 54 stickers of the cube, stored face by face in `U R F D L B` order.
/// Each face is row-major as seen when looking straight at it, with `U`
/// viewed with `B` on top and `D` viewed with `F` on top.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FaceletState {
    facelets: [Color; FACELET_COUNT],
}

impl FaceletState {
    pub fn solved() -> FaceletState {
        FaceletState {
            facelets: std::array::from_fn(|i| Color::ALL[i / FACELETS_PER_FACE]),
        }
    }

    pub fn from_facelets(facelets: [Color; FACELET_COUNT]) -> FaceletState {
        FaceletState { facelets }
    }

    pub fn facelets(&self) -> &[Color; FACELET_COUNT] {
        &self.facelets
    }

    pub(crate) fn facelets_mut(&mut self) -> &mut [Color; FACELET_COUNT] {
        &mut self.facelets
    }

    fn index(face: Face, row: usize, col: usize) -> usize {
        assert!(
            row < 3 && col < 3,
            "facelet ({row}, {col}) is outside of a 3x3 face"
        );

        face.offset() + row * 3 + col
    }

    pub fn get(&self, face: Face, row: usize, col: usize) -> Color {
        self.facelets[Self::index(face, row, col)]
    }

    pub fn set(&mut self, face: Face, row: usize, col: usize, color: Color) {
        self.facelets[Self::index(face, row, col)] = color;
    }

    /// The nine stickers of `face`, row-major.
    pub fn face(&self, face: Face) -> &[Color] {
        &self.facelets[face.offset()..face.offset() + FACELETS_PER_FACE]
    }

    pub fn center(&self, face: Face) -> Color {
        self.get(face, 1, 1)
    }

    /// The center of every face, in `Face::ALL` order.
    pub fn centers(&self) -> [Color; 6] {
        Face::ALL.map(|face| self.center(face))
    }

    /// Whether every face is uniformly the color of its own center. Cubes
    /// that are solved but held in another orientation count as solved.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let center = self.center(face);
            self.face(face).iter().all(|&color| color == center)
        })
    }

    /// How often each color appears, indexed by `Color as usize`.
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];

        for &color in &self.facelets {
            counts[color as usize] += 1;
        }

        counts
    }
}

impl Default for FaceletState {
    fn default() -> Self {
        FaceletState::solved()
    }
}

impl Debug for FaceletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaceletState")
            .field(&notation::encode(self))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_state_layout() {
        let solved = FaceletState::solved();

        assert!(solved.is_solved());
        assert_eq!(solved.color_counts(), [9; 6]);
        for face in Face::ALL {
            assert_eq!(solved.center(face), face.home_color());
            assert_eq!(solved.center(face).home_face(), face);
        }
        assert_eq!(solved, FaceletState::default());
        assert_eq!(solved.centers(), Color::ALL);
    }

    #[test]
    fn get_and_set() {
        let mut state = FaceletState::solved();

        state.set(Face::F, 0, 2, Color::Blue);
        assert_eq!(state.get(Face::F, 0, 2), Color::Blue);
        assert_eq!(state.facelets()[Face::F.offset() + 2], Color::Blue);
        assert!(!state.is_solved());
        assert_ne!(state, FaceletState::solved());

        state.set(Face::F, 0, 2, Color::Green);
        assert_eq!(state, FaceletState::solved());
    }

    #[test]
    #[should_panic = "outside of a 3x3 face"]
    fn out_of_range_facelet() {
        FaceletState::solved().get(Face::U, 3, 0);
    }

    #[test]
    fn face_letters() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::from_letter('M'), None);
    }
}
