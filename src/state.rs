//! State types owned by the event loop.
//!
//! Contains the table viewport (selection and scroll position) and the
//! confirmation dialog's option state.

/// Rows taken by the header line and the instructions bar.
const CHROME_ROWS: u16 = 2;

/// Horizontal navigation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Selected row and first visible row of the table, both indices into the
/// dataset.
///
/// Invariants for a non-empty dataset of `len` rows shown `height` rows at a
/// time:
/// - `current_row < len`
/// - `top_row <= current_row < top_row + height`
/// - `top_row <= len.saturating_sub(height)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub top_row: usize,
    pub current_row: usize,
}

impl ViewportState {
    /// Number of data rows that fit on a surface with `rows` lines.
    pub fn visible_height(rows: u16) -> usize {
        rows.saturating_sub(CHROME_ROWS) as usize
    }

    pub fn move_up(&mut self) {
        if self.current_row > 0 {
            self.current_row -= 1;
            if self.current_row < self.top_row {
                self.top_row = self.top_row.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self, len: usize, visible_height: usize) {
        let height = visible_height.max(1);
        if self.current_row + 1 < len {
            self.current_row += 1;
            if self.current_row >= self.top_row + height {
                self.top_row = (self.top_row + 1).min(len.saturating_sub(height));
            }
        }
    }

    /// Re-establish the invariants after the dataset or the screen changed
    /// size.
    pub fn clamp(&mut self, len: usize, visible_height: usize) {
        if len == 0 {
            *self = Self::default();
            return;
        }
        let height = visible_height.max(1);
        self.current_row = self.current_row.min(len - 1);
        if self.current_row < self.top_row {
            self.top_row = self.current_row;
        }
        if self.current_row >= self.top_row + height {
            self.top_row = self.current_row + 1 - height;
        }
        self.top_row = self.top_row.min(len.saturating_sub(height));
    }
}

/// Where a confirmation dialog is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    Open,
    Navigating,
    CommittedYes,
    CommittedNo,
}

/// Option selection for a confirmation dialog. Option 0 is the affirmative
/// choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogState {
    pub selected_option: usize,
    pub phase: DialogPhase,
    option_count: usize,
}

impl DialogState {
    pub fn new(option_count: usize) -> Self {
        Self {
            selected_option: 0,
            phase: DialogPhase::Open,
            option_count,
        }
    }

    pub fn option_count(&self) -> usize {
        self.option_count
    }

    pub fn navigate(&mut self, direction: Direction) {
        match direction {
            Direction::Left if self.selected_option > 0 => self.selected_option -= 1,
            Direction::Right if self.selected_option + 1 < self.option_count => {
                self.selected_option += 1
            }
            _ => {}
        }
        self.phase = DialogPhase::Navigating;
    }

    /// Lock in the current choice. Returns `true` if the affirmative option
    /// was chosen.
    pub fn commit(&mut self) -> bool {
        let confirmed = self.selected_option == 0;
        self.phase = if confirmed {
            DialogPhase::CommittedYes
        } else {
            DialogPhase::CommittedNo
        };
        confirmed
    }

    pub fn is_committed(&self) -> bool {
        matches!(
            self.phase,
            DialogPhase::CommittedYes | DialogPhase::CommittedNo
        )
    }
}
