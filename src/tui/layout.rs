/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 80 cols: single column
    Narrow,
    /// 80-119 cols: two columns
    Medium,
    /// 120+ cols: three columns
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=79 => Breakpoint::Narrow,
            80..=119 => Breakpoint::Medium,
            _ => Breakpoint::Wide,
        }
    }

    /// Story grid column count at this breakpoint.
    /// Row navigation strides by this value, so it must match what render uses.
    pub fn columns(&self) -> usize {
        match self {
            Breakpoint::Narrow => 1,
            Breakpoint::Medium => 2,
            Breakpoint::Wide => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Narrow);
        assert_eq!(Breakpoint::from_width(79), Breakpoint::Narrow);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Medium);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(200), Breakpoint::Wide);
    }

    #[test]
    fn column_counts() {
        assert_eq!(Breakpoint::Narrow.columns(), 1);
        assert_eq!(Breakpoint::Medium.columns(), 2);
        assert_eq!(Breakpoint::Wide.columns(), 3);
    }
}
