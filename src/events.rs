// GestureLink — Shared Data Types

// ---------------------------------------------------------------------------
// Sensor Sample (3-axis accelerometer reading)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default)]
pub struct Sample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

// ---------------------------------------------------------------------------
// Gesture Classification Categories
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureClass {
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl GestureClass {
    /// Map a model label string to a `GestureClass`.
    /// Returns `None` for unknown labels (including the "unknown" sentinel).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "idle" => Some(Self::Idle),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Directional gestures get a timed color flash; `Idle` is shown steadily.
    pub fn is_directional(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
