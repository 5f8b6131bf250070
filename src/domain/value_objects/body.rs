use serde::Serialize;

/// The celestial bodies a chart row can refer to: the seven classical
/// planets, the two lunar nodes, and the ascendant point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Ascendant,
}

/// Engine body order: indices 0-6 are the classical planets, 7/8 the nodes.
pub const ALL_BODIES: [Body; 9] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
];

/// The seven classical planets, the only bodies with dignity, combustion,
/// and retrograde semantics.
pub const CLASSICAL_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
];

impl Body {
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Ascendant => "Ascendant",
        }
    }

    /// Resolve an engine body index (0 = Sun .. 8 = Ketu).
    pub fn from_index(index: u8) -> Option<Body> {
        ALL_BODIES.get(index as usize).copied()
    }

    /// Engine index of this body; `None` for the ascendant.
    pub fn index(&self) -> Option<u8> {
        ALL_BODIES.iter().position(|b| b == self).map(|i| i as u8)
    }

    /// True for Sun through Saturn.
    pub fn is_classical(&self) -> bool {
        matches!(self.index(), Some(i) if i <= 6)
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
