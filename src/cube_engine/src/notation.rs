//! Conversion between [`FaceletState`] and the 54 character facelet string
//! that Kociemba-style solvers read and write.
//!
//! The string lists the faces in `U R F D L B` order, nine characters each,
//! and labels every sticker with the letter of the face whose color it has.

use thiserror::Error;

use crate::facelets::{Color, FACELET_COUNT, FACELETS_PER_FACE, Face, FaceletState};

pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Invalid facelet string length, expected 54 characters but got {0}")]
    WrongLength(usize),
    #[error("Invalid facelet {symbol:?} at position {position}, expected one of U, R, F, D, L or B")]
    UnknownSymbol { symbol: char, position: usize },
    #[error("Invalid color count, expected 9 facelets labelled {symbol} but got {count}")]
    WrongColorCount { symbol: char, count: usize },
    #[error("Two faces share the center color {0:?}")]
    SharedCenter(Color),
}

pub fn encode(state: &FaceletState) -> String {
    state
        .facelets()
        .iter()
        .map(|color| color.home_face().letter())
        .collect()
}

/// Like [`encode`], but labels every color by the face whose center
/// currently shows it. This is what a solver needs once `M` turns have moved
/// the centers away from home; for a cube with its centers at home the two
/// encodings agree.
///
/// # Errors
///
/// If two centers have the same color, which only happens for states that
/// did not come from turning a cube
pub fn encode_for_solver(state: &FaceletState) -> Result<String, NotationError> {
    let mut labels: [Option<Face>; 6] = [None; 6];

    for face in Face::ALL {
        let center = state.center(face);
        if labels[center as usize].replace(face).is_some() {
            return Err(NotationError::SharedCenter(center));
        }
    }

    Ok(state
        .facelets()
        .iter()
        .map(|&color| {
            labels[color as usize]
                .expect("six distinct centers label all six colors")
                .letter()
        })
        .collect())
}

/// # Errors
///
/// If `facelets` is not 54 characters long, contains anything other than
/// the six face letters, or does not contain each letter exactly nine times
pub fn decode(facelets: &str) -> Result<FaceletState, NotationError> {
    let len = facelets.chars().count();
    if len != FACELET_COUNT {
        return Err(NotationError::WrongLength(len));
    }

    let mut colors = [Color::White; FACELET_COUNT];

    for (position, (symbol, color)) in facelets.chars().zip(&mut colors).enumerate() {
        *color = Face::from_letter(symbol)
            .ok_or(NotationError::UnknownSymbol { symbol, position })?
            .home_color();
    }

    let state = FaceletState::from_facelets(colors);

    for (face, count) in Face::ALL.into_iter().zip(state.color_counts()) {
        if count != FACELETS_PER_FACE {
            return Err(NotationError::WrongColorCount {
                symbol: face.letter(),
                count,
            });
        }
    }

    Ok(state)
}
