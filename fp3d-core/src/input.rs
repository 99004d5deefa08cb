/// Technology-neutral input queries consumed once per tick
use crate::vector::Vec2;

/// Logical controls; frontends map their own keys and buttons onto these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Rise,
    Sink,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    /// Jump to a quarter-turn of pitch
    SnapTilt,
    /// Jump to a quarter-turn of yaw
    SnapAngle,
    Reset,
    Pick,
}

pub trait InputSource {
    /// The control is down during this tick
    fn is_held(&self, key: Key) -> bool;
    /// The control went down this tick
    fn just_pressed(&self, key: Key) -> bool;
    /// Cursor position in pixels
    fn cursor(&self) -> Vec2;
    /// Wheel movement since the previous tick
    fn wheel_delta(&self) -> f64;
}
