use std::fmt;

/// A board coordinate. Both `file` and `rank` are 1-indexed, so the white
/// king starts on `Square::new(5, 1)` (e1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl Square {
    pub const fn new(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Whether the square lies on a `board_size` x `board_size` board.
    pub fn is_on_board(&self, board_size: u8) -> bool {
        (1..=board_size).contains(&self.file) && (1..=board_size).contains(&self.rank)
    }

    /// Letter of the file in notation (`1 -> 'a'`). Files without a letter
    /// show as `'?'`.
    pub fn file_char(&self) -> char {
        self.file
            .checked_sub(1)
            .and_then(|index| b'a'.checked_add(index))
            .filter(u8::is_ascii_lowercase)
            .map_or('?', char::from)
    }

    /// Parse a square such as `e2` or `c10` from the front of `text`.
    /// Returns the square and the number of bytes consumed.
    pub(crate) fn parse_prefix(text: &str) -> Option<(Self, usize)> {
        let bytes = text.as_bytes();
        let letter = *bytes.first()?;
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || digits > 2 {
            return None;
        }
        let rank: u8 = text[1..1 + digits].parse().ok()?;
        if rank == 0 {
            return None;
        }
        Some((Self::new(letter - b'a' + 1, rank), 1 + digits))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}
