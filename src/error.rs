use std::error;
use std::fmt::{self, Display, Formatter};

/// Failures reported by the ordered containers.
///
/// Neither variant leaves a container in a modified state: an operation that
/// returns an error has had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The value to erase is not stored in the container.
    NotFound,
    /// The comparator is not antisymmetric for some pair of values, i.e.
    /// `cmp(a, b)` is not the reverse of `cmp(b, a)`.
    InconsistentComparator,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "value not found in container"),
            Error::InconsistentComparator => write!(
                f,
                "comparator is not antisymmetric: cmp(a, b) does not mirror cmp(b, a)"
            ),
        }
    }
}

impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

pub type Result<T> = std::result::Result<T, Error>;
