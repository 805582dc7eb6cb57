// Selection controller - the per-view focus state machine
//
// Tracks which index of an ordered collection is selected. `None` is the
// "no item focused" sentinel (focus is on a control outside the collection,
// e.g. the load-more button). The index is positional, not an item identity:
// appends keep it valid because items are only ever appended, and resizes
// re-clamp it.
//
// Edge policy is asymmetric on purpose: moving forward past the last item
// reports `PastEnd` without mutating, so the caller can hand focus to an
// external control instead of silently clamping; moving backward always
// clamps to 0.

/// Result of a directional move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Selection landed on this index (including entering the collection)
    Moved(usize),
    /// Already at the boundary in that direction; selection unchanged
    Clamped,
    /// Forward move past the last item; selection unchanged, caller decides
    PastEnd,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<usize>,
    len: usize,
}

impl SelectionController {
    pub fn new(len: usize) -> Self {
        Self {
            selected: None,
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Resize the collection, re-clamping the selection. Appending leaves an
    /// existing selection untouched.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if let Some(i) = self.selected {
            if len == 0 {
                self.selected = None;
            } else if i >= len {
                self.selected = Some(len - 1);
            }
        }
    }

    /// Lateral move. Entering from no-selection always lands on 0 regardless
    /// of the delta's sign.
    pub fn move_by(&mut self, delta: isize) -> MoveOutcome {
        if self.len == 0 {
            return MoveOutcome::Clamped;
        }
        let Some(current) = self.selected else {
            self.selected = Some(0);
            return MoveOutcome::Moved(0);
        };

        let proposed = current as isize + delta;
        if proposed >= self.len as isize {
            if current == self.len - 1 {
                return MoveOutcome::PastEnd;
            }
            self.selected = Some(self.len - 1);
            return MoveOutcome::Moved(self.len - 1);
        }
        if proposed < 0 {
            if current == 0 {
                return MoveOutcome::Clamped;
            }
            self.selected = Some(0);
            return MoveOutcome::Moved(0);
        }
        self.selected = Some(proposed as usize);
        MoveOutcome::Moved(proposed as usize)
    }

    /// Row-wise move for grid layouts: one row is `columns` indices. Forward
    /// past the last item signals `PastEnd`; backward past the first row
    /// clamps to 0.
    pub fn move_by_row(&mut self, delta_rows: isize, columns: usize) -> MoveOutcome {
        if self.len == 0 || columns == 0 {
            return MoveOutcome::Clamped;
        }
        let Some(current) = self.selected else {
            self.selected = Some(0);
            return MoveOutcome::Moved(0);
        };

        let proposed = current as isize + delta_rows * columns as isize;
        if proposed >= self.len as isize {
            return MoveOutcome::PastEnd;
        }
        if proposed < 0 {
            if current == 0 {
                return MoveOutcome::Clamped;
            }
            self.selected = Some(0);
            return MoveOutcome::Moved(0);
        }
        self.selected = Some(proposed as usize);
        MoveOutcome::Moved(proposed as usize)
    }

    /// Absolute set. `-1` (clear) is always permitted; other out-of-range
    /// values are ignored.
    pub fn set_index(&mut self, index: isize) {
        if index == -1 {
            self.selected = None;
        } else if index >= 0 && (index as usize) < self.len {
            self.selected = Some(index as usize);
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Select the last item of the collection.
    pub fn focus_last(&mut self) {
        if self.len > 0 {
            self.selected = Some(self.len - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_lands_on_zero_regardless_of_direction() {
        let mut sel = SelectionController::new(5);
        assert_eq!(sel.move_by(-1), MoveOutcome::Moved(0));

        let mut sel = SelectionController::new(5);
        assert_eq!(sel.move_by(1), MoveOutcome::Moved(0));

        let mut sel = SelectionController::new(5);
        assert_eq!(sel.move_by_row(1, 3), MoveOutcome::Moved(0));
    }

    #[test]
    fn forward_from_none_reaches_end_then_signals() {
        let len = 4;
        let mut sel = SelectionController::new(len);
        for _ in 0..len {
            sel.move_by(1);
        }
        assert_eq!(sel.selected(), Some(len - 1));
        // One more forward press signals instead of going out of range
        assert_eq!(sel.move_by(1), MoveOutcome::PastEnd);
        assert_eq!(sel.selected(), Some(len - 1));
    }

    #[test]
    fn arbitrary_move_sequences_stay_in_range() {
        let mut sel = SelectionController::new(7);
        for delta in [3, -10, 5, 5, -1, 100, -100, 2] {
            sel.move_by(delta);
            if let Some(i) = sel.selected() {
                assert!(i < 7);
            }
        }
    }

    #[test]
    fn backward_from_row_zero_clamps_never_signals() {
        let mut sel = SelectionController::new(9);
        sel.set_index(1); // row 0, column 1 of a 3-wide grid
        assert_eq!(sel.move_by_row(-1, 3), MoveOutcome::Moved(0));
        assert_eq!(sel.move_by_row(-1, 3), MoveOutcome::Clamped);
        assert_eq!(sel.selected(), Some(0));
    }

    #[test]
    fn row_forward_past_last_item_signals() {
        let mut sel = SelectionController::new(7); // 3 columns -> last row is [6]
        sel.set_index(5);
        assert_eq!(sel.move_by_row(1, 3), MoveOutcome::PastEnd);
        assert_eq!(sel.selected(), Some(5));
    }

    #[test]
    fn append_preserves_selection() {
        let mut sel = SelectionController::new(10);
        sel.set_index(4);
        sel.set_len(40);
        assert_eq!(sel.selected(), Some(4));

        let mut cleared = SelectionController::new(10);
        cleared.set_len(40);
        assert_eq!(cleared.selected(), None);
    }

    #[test]
    fn shrink_reclamps_selection() {
        let mut sel = SelectionController::new(10);
        sel.set_index(9);
        sel.set_len(3);
        assert_eq!(sel.selected(), Some(2));
        sel.set_len(0);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn set_index_ignores_out_of_range_but_allows_clear() {
        let mut sel = SelectionController::new(3);
        sel.set_index(2);
        sel.set_index(99);
        assert_eq!(sel.selected(), Some(2));
        sel.set_index(-1);
        assert_eq!(sel.selected(), None);
        sel.set_index(-5);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn focus_last_selects_final_item() {
        let mut sel = SelectionController::new(6);
        sel.focus_last();
        assert_eq!(sel.selected(), Some(5));

        let mut empty = SelectionController::new(0);
        empty.focus_last();
        assert_eq!(empty.selected(), None);
    }
}
