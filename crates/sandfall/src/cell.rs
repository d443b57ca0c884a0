//! Material ids and their classification.

use std::fmt;

/// Highest hue the sand brush hands out. Ids `FIRST_HUE..=LAST_HUE` are sand.
pub const LAST_HUE: u16 = 721;

/// Behavioural class of a material id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Empty,
    Barrier,
    Sand,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Barrier => write!(f, "Barrier"),
            Self::Sand => write!(f, "Sand"),
        }
    }
}

/// Material id stored per cell. The raw value is read directly by the
/// renderer as a hue index, so it stays a plain `u16`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Material(pub u16);

impl Material {
    pub const EMPTY: Self = Self(0);
    pub const BARRIER: Self = Self(1);
    pub const FIRST_HUE: Self = Self(2);

    /// Sand with the given hue. Values below `FIRST_HUE` are clamped up so
    /// the result is always sand.
    #[must_use]
    pub fn sand(hue: u16) -> Self {
        Self(hue.max(Self::FIRST_HUE.0))
    }

    #[must_use]
    pub fn kind(self) -> Kind {
        match self.0 {
            0 => Kind::Empty,
            1 => Kind::Barrier,
            _ => Kind::Sand,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    #[must_use]
    pub fn is_barrier(self) -> bool {
        self == Self::BARRIER
    }

    #[must_use]
    pub fn is_sand(self) -> bool {
        self.0 >= Self::FIRST_HUE.0
    }
}

impl From<u16> for Material {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Sand => write!(f, "Sand({})", self.0),
            kind => write!(f, "{kind}"),
        }
    }
}
