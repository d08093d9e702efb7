use serde::{Deserialize, Serialize};

/// Standard projectile family a ballistic coefficient is referenced to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragFamily {
    G1,
    G7,
}

impl DragFamily {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "G1" => Some(DragFamily::G1),
            "G7" => Some(DragFamily::G7),
            _ => None,
        }
    }
}

impl std::fmt::Display for DragFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A ballistic coefficient tagged with the drag family it refers to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticCoefficient {
    pub value: f64,
    pub family: DragFamily,
}

impl BallisticCoefficient {
    pub fn g1(value: f64) -> Self {
        Self { value, family: DragFamily::G1 }
    }

    pub fn g7(value: f64) -> Self {
        Self { value, family: DragFamily::G7 }
    }
}

impl std::fmt::Display for BallisticCoefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} ({})", self.value, self.family)
    }
}
