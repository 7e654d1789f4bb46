use thiserror::Error;

use crate::maze::Coordinate;

/// Errors raised by maze construction, generation and solving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The coordinate lies outside the region the operation accepts.
    #[error("coordinate {coord} is out of bounds for a {height}x{width} maze")]
    OutOfBounds {
        coord: Coordinate,
        height: usize,
        width: usize,
    },
    /// The two coordinates are not exactly one step apart along one axis.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: Coordinate, to: Coordinate },
    /// Zero-sized dimensions or a maze made of a single cell.
    #[error("invalid maze dimensions {height}x{width}: need at least 2 cells")]
    InvalidDimensions { height: usize, width: usize },
}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// Reject dimensions the maze types accept but that make no sense to generate:
/// an empty working rectangle or a single cell.
pub fn check_dimensions(height: usize, width: usize) -> Result<(), MazeError> {
    if height == 0 || width == 0 || height * width < 2 {
        return Err(MazeError::InvalidDimensions { height, width });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(1, 2).is_ok());
        assert!(check_dimensions(2, 1).is_ok());
        assert!(check_dimensions(5, 5).is_ok());
        assert_eq!(
            check_dimensions(1, 1),
            Err(MazeError::InvalidDimensions {
                height: 1,
                width: 1
            })
        );
        assert!(check_dimensions(0, 7).is_err());
        assert!(check_dimensions(7, 0).is_err());
    }

    #[test]
    fn test_into_io_error() {
        let err: std::io::Error = MazeError::InvalidDimensions {
            height: 0,
            width: 0,
        }
        .into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
