//! Running state of a month-by-month debt projection

/// Accumulated unpaid balance at a point in the projection
///
/// The deficit is tracked as a positive amount and negated when reported, so a
/// debt of 1,000 reads as a balance of -1,000.
#[derive(Debug, Clone, Default)]
pub struct ProjectionState {
    /// Elapsed months (1-indexed once advanced; 0 before the first month)
    pub month: u32,

    /// Accumulated unpaid amount, never negative
    pub deficit: f64,
}

impl ProjectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Add this month's uncovered amount, then compound the whole balance
    pub fn accrue(&mut self, addition: f64, monthly_rate: f64) {
        self.deficit = (self.deficit + addition) * (1.0 + monthly_rate);
    }

    /// Signed balance: negative when in debt
    pub fn balance(&self) -> f64 {
        if self.deficit == 0.0 {
            0.0
        } else {
            -self.deficit
        }
    }

    /// True on the last month of a year
    pub fn is_year_end(&self) -> bool {
        self.month > 0 && self.month % 12 == 0
    }

    pub fn year(&self) -> u32 {
        self.month / 12
    }
}
