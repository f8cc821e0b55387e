use std::fmt;

/// Lifecycle of one scoped session. States are only ever entered once, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Unbound,
    Binding,
    Bound { verified: bool },
    Releasing,
    Released,
}

impl fmt::Display for ScopeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbound => write!(f, "unbound"),
            Self::Binding => write!(f, "binding"),
            Self::Bound { verified: true } => write!(f, "bound (verified)"),
            Self::Bound { verified: false } => write!(f, "bound"),
            Self::Releasing => write!(f, "releasing"),
            Self::Released => write!(f, "released"),
        }
    }
}
