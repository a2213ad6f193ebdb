use cube_engine::{Color, Face, FaceletState};
use itertools::Itertools;
use owo_colors::OwoColorize;

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::White => (255, 255, 255),
        Color::Red => (200, 16, 46),
        Color::Green => (0, 155, 72),
        Color::Yellow => (255, 213, 0),
        Color::Orange => (255, 88, 0),
        Color::Blue => (0, 70, 173),
    }
}

fn row(state: &FaceletState, face: Face, row: usize) -> String {
    (0..3)
        .map(|col| {
            let color = state.get(face, row, col);
            let (r, g, b) = rgb(color);
            format!(" {} ", color.home_face().letter())
                .black()
                .on_truecolor(r, g, b)
                .to_string()
        })
        .collect()
}

/// Draw the cube unfolded with U on top, then L F R B, then D.
pub fn render(state: &FaceletState) -> String {
    let padding = " ".repeat(9);
    let mut lines = Vec::new();

    for r in 0..3 {
        lines.push(format!("{padding}{}", row(state, Face::U, r)));
    }
    for r in 0..3 {
        lines.push(
            [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| row(state, face, r))
                .join(""),
        );
    }
    for r in 0..3 {
        lines.push(format!("{padding}{}", row(state, Face::D, r)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use cube_engine::{Layer, Move};

    use super::*;

    #[test]
    fn renders_every_sticker() {
        let mut state = FaceletState::solved();
        state.apply(Move::clockwise(Layer::R));
        let net = render(&state);

        assert_eq!(net.lines().count(), 9);
        for face in Face::ALL {
            assert_eq!(net.matches(face.letter()).count(), 9, "{face:?}");
        }
    }
}
