use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::coords::Coords;

/// Position of a [`ColourPair`] within its [`Grid`](crate::Grid), which doubles as its exact cover column.
pub type ColourPairIndex = usize;

/// The colours a pair of dots may take, as found in Flow Free.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, strum::Display)]
pub enum DotColour {
    /// `R`
    Red,
    /// `G`
    Green,
    /// `B`
    Blue,
    /// `Y`
    Yellow,
    /// `O`
    Orange,
    /// `C`
    Cyan,
    /// `M`
    Magenta,
    /// `A`
    Maroon,
    /// `P`
    Purple,
    /// `W`
    White,
    /// `E`
    Grey,
    /// `L`
    Lime,
    /// `T`
    Tan,
    /// `D`
    DarkBlue,
    /// `Q`
    Aqua,
    /// `K`
    Pink,
}

impl DotColour {
    /// The upper case letter standing for this colour in a text layout.
    pub fn as_char(&self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Orange => 'O',
            Self::Cyan => 'C',
            Self::Magenta => 'M',
            Self::Maroon => 'A',
            Self::Purple => 'P',
            Self::White => 'W',
            Self::Grey => 'E',
            Self::Lime => 'L',
            Self::Tan => 'T',
            Self::DarkBlue => 'D',
            Self::Aqua => 'Q',
            Self::Pink => 'K',
        }
    }

    /// Inverse of [`Self::as_char`].
    pub fn from_char(c: char) -> Option<Self> {
        Self::VARIANTS.iter().find(|colour| colour.as_char() == c).copied()
    }
}

/// The two dots of one flow.
///
/// Pairs are only created by a [`GridBuilder`](crate::GridBuilder), which assigns `index` once, in insertion order.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ColourPair {
    pub(crate) start: Coords,
    pub(crate) end: Coords,
    pub(crate) colour: DotColour,
    pub(crate) index: ColourPairIndex,
}

impl ColourPair {
    /// The dot every path of this pair starts from.
    #[inline]
    pub fn start(&self) -> Coords {
        self.start
    }

    /// The dot every path of this pair heads for.
    #[inline]
    pub fn end(&self) -> Coords {
        self.end
    }

    /// The colour of both dots.
    #[inline]
    pub fn colour(&self) -> DotColour {
        self.colour
    }

    /// Position within [`Grid::colour_pairs`](crate::Grid::colour_pairs), and the column selecting this pair.
    #[inline]
    pub fn index(&self) -> ColourPairIndex {
        self.index
    }

    /// True iff either dot of this pair is on `coords`.
    pub fn has_dot_at(&self, coords: Coords) -> bool {
        self.start == coords || self.end == coords
    }
}

impl Display for ColourPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.colour, self.start, self.end)
    }
}
