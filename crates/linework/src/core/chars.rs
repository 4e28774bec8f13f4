//! Character classification for the grid parser
//!
//! Every cell of the input falls into exactly one class; anything outside
//! the recognized set is blank.

use crate::core::Anchor;

/// Check if a character draws a horizontal line (`-` solid, `=` dashed)
pub fn is_horizontal_rule(c: char) -> bool {
    matches!(c, '-' | '=')
}

/// Check if a character draws a vertical line (`|` solid, `:` dashed)
pub fn is_vertical_rule(c: char) -> bool {
    matches!(c, '|' | ':')
}

/// Check if a character is the dashed variant of its line class
pub fn is_dashed_variant(c: char) -> bool {
    matches!(c, '=' | ':')
}

/// Check if a character marks a bullet point
pub fn is_bullet(c: char) -> bool {
    c == '*'
}

/// The anchor produced by a junction character, if any
pub fn anchor_kind(c: char) -> Option<Anchor> {
    match c {
        '+' => Some(Anchor::Multi),
        '/' => Some(Anchor::FirstDiagonal),
        '\\' => Some(Anchor::SecondDiagonal),
        _ => None,
    }
}

/// Class of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    /// `-` or `=`
    Horizontal,
    /// `|` or `:`
    Vertical,
    /// `+`, `/`, or `\`
    Anchor(Anchor),
    /// `*`
    Bullet,
    /// Everything else
    Blank,
}

/// Classify one input character
pub fn classify(c: char) -> CellClass {
    if is_horizontal_rule(c) {
        CellClass::Horizontal
    } else if is_vertical_rule(c) {
        CellClass::Vertical
    } else if is_bullet(c) {
        CellClass::Bullet
    } else if let Some(kind) = anchor_kind(c) {
        CellClass::Anchor(kind)
    } else {
        CellClass::Blank
    }
}
