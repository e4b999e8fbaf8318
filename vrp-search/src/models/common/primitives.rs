/// Specifies timestamp type.
pub type Timestamp = f64;

/// Specifies duration type in time units.
pub type Duration = f64;

/// Specifies distance type in distance units.
pub type Distance = f64;
