pub(crate) const GLYPH_WIDTH: i32 = 3;
pub(crate) const GLYPH_HEIGHT: i32 = 5;

/// 3x5 bitmap; bit 2 of each row is the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Glyph {
    pub rows: [u8; 5],
}

impl Glyph {
    pub(crate) fn is_set(self, col: i32, row: i32) -> bool {
        if !(0..GLYPH_WIDTH).contains(&col) || !(0..GLYPH_HEIGHT).contains(&row) {
            return false;
        }
        let bits = self.rows[row as usize];
        (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 1
    }
}

const fn g(rows: [u8; 5]) -> Glyph {
    Glyph { rows }
}

pub(crate) const SPACE_GLYPH: Glyph = g([0, 0, 0, 0, 0]);
const UNKNOWN_GLYPH: Glyph = g([0b111, 0b111, 0b111, 0b111, 0b111]);

/// Lowercase letters share the uppercase shapes; anything unmapped draws as a solid block.
pub(crate) fn glyph_for(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        ' ' => SPACE_GLYPH,
        'A' => g([0b010, 0b101, 0b111, 0b101, 0b101]),
        'B' => g([0b110, 0b101, 0b110, 0b101, 0b110]),
        'C' => g([0b011, 0b100, 0b100, 0b100, 0b011]),
        'D' => g([0b110, 0b101, 0b101, 0b101, 0b110]),
        'E' => g([0b111, 0b100, 0b110, 0b100, 0b111]),
        'F' => g([0b111, 0b100, 0b110, 0b100, 0b100]),
        'G' => g([0b011, 0b100, 0b101, 0b101, 0b011]),
        'H' => g([0b101, 0b101, 0b111, 0b101, 0b101]),
        'I' => g([0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => g([0b001, 0b001, 0b001, 0b101, 0b010]),
        'K' => g([0b101, 0b110, 0b100, 0b110, 0b101]),
        'L' => g([0b100, 0b100, 0b100, 0b100, 0b111]),
        'M' => g([0b101, 0b111, 0b111, 0b101, 0b101]),
        'N' => g([0b110, 0b101, 0b101, 0b101, 0b101]),
        'O' => g([0b010, 0b101, 0b101, 0b101, 0b010]),
        'P' => g([0b110, 0b101, 0b110, 0b100, 0b100]),
        'Q' => g([0b010, 0b101, 0b101, 0b110, 0b011]),
        'R' => g([0b110, 0b101, 0b110, 0b101, 0b101]),
        'S' => g([0b011, 0b100, 0b010, 0b001, 0b110]),
        'T' => g([0b111, 0b010, 0b010, 0b010, 0b010]),
        'U' => g([0b101, 0b101, 0b101, 0b101, 0b111]),
        'V' => g([0b101, 0b101, 0b101, 0b101, 0b010]),
        'W' => g([0b101, 0b101, 0b111, 0b111, 0b101]),
        'X' => g([0b101, 0b101, 0b010, 0b101, 0b101]),
        'Y' => g([0b101, 0b101, 0b010, 0b010, 0b010]),
        'Z' => g([0b111, 0b001, 0b010, 0b100, 0b111]),
        '0' => g([0b111, 0b101, 0b101, 0b101, 0b111]),
        '1' => g([0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => g([0b110, 0b001, 0b010, 0b100, 0b111]),
        '3' => g([0b110, 0b001, 0b010, 0b001, 0b110]),
        '4' => g([0b101, 0b101, 0b111, 0b001, 0b001]),
        '5' => g([0b111, 0b100, 0b110, 0b001, 0b110]),
        '6' => g([0b011, 0b100, 0b111, 0b101, 0b111]),
        '7' => g([0b111, 0b001, 0b010, 0b010, 0b010]),
        '8' => g([0b111, 0b101, 0b111, 0b101, 0b111]),
        '9' => g([0b111, 0b101, 0b111, 0b001, 0b110]),
        '+' => g([0b000, 0b010, 0b111, 0b010, 0b000]),
        '-' => g([0b000, 0b000, 0b111, 0b000, 0b000]),
        '.' => g([0b000, 0b000, 0b000, 0b000, 0b010]),
        ',' => g([0b000, 0b000, 0b000, 0b010, 0b100]),
        ':' => g([0b000, 0b010, 0b000, 0b010, 0b000]),
        '/' => g([0b001, 0b001, 0b010, 0b100, 0b100]),
        '!' => g([0b010, 0b010, 0b010, 0b000, 0b010]),
        '?' => g([0b110, 0b001, 0b010, 0b000, 0b010]),
        '%' => g([0b101, 0b001, 0b010, 0b100, 0b101]),
        '(' => g([0b001, 0b010, 0b010, 0b010, 0b001]),
        ')' => g([0b100, 0b010, 0b010, 0b010, 0b100]),
        '<' => g([0b001, 0b010, 0b100, 0b010, 0b001]),
        '>' => g([0b100, 0b010, 0b001, 0b010, 0b100]),
        '\'' => g([0b010, 0b010, 0b000, 0b000, 0b000]),
        '#' => g([0b101, 0b111, 0b101, 0b111, 0b101]),
        _ => UNKNOWN_GLYPH,
    }
}
