use std::fmt::{self, Debug, Formatter};

/// Writes a preformatted string as-is when debug formatted, without quotes or escapes. Used to
/// embed multi-line drawings in [`Formatter::debug_struct`] output.
pub struct DebugRaw(pub String);

impl Debug for DebugRaw {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
