use crate::loss::LossMode;

/// One row of the XOR truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthRow {
    pub x1: bool,
    pub x2: bool,
}

impl TruthRow {
    pub const fn new(x1: bool, x2: bool) -> Self {
        Self { x1, x2 }
    }

    /// XOR of the two inputs.
    pub fn label(&self) -> bool {
        self.x1 != self.x2
    }

    /// Two-letter tag used when printing predictions, first input first.
    pub fn tag(&self) -> &'static str {
        match (self.x1, self.x2) {
            (true, false) => "TF",
            (false, false) => "FF",
            (true, true) => "TT",
            (false, true) => "FT",
        }
    }

    /// The two inputs encoded under the given mode.
    pub fn encode(&self, mode: LossMode) -> [f32; 2] {
        [mode.encode(self.x1), mode.encode(self.x2)]
    }

    /// The XOR label encoded under the given mode.
    pub fn encoded_label(&self, mode: LossMode) -> f32 {
        mode.encode(self.label())
    }
}

/// The 4 rows in training order, first input cycling fastest.
pub const TRAIN_ROWS: [TruthRow; 4] = [
    TruthRow::new(false, false),
    TruthRow::new(true, false),
    TruthRow::new(false, true),
    TruthRow::new(true, true),
];

/// The order the reloaded graph is queried in after training.
pub const QUERY_ROWS: [TruthRow; 4] = [
    TruthRow::new(true, false),
    TruthRow::new(false, false),
    TruthRow::new(true, true),
    TruthRow::new(false, true),
];

/// The row held out for the sanity query on the training graph.
pub const HELD_OUT_ROW: TruthRow = TruthRow::new(false, true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_xor() {
        for row in TRAIN_ROWS {
            assert_eq!(row.label(), row.x1 ^ row.x2);
        }
    }

    #[test]
    fn train_rows_cycle_first_input_fastest() {
        let tags: Vec<_> = TRAIN_ROWS.iter().map(TruthRow::tag).collect();
        assert_eq!(tags, ["FF", "TF", "FT", "TT"]);
    }

    #[test]
    fn query_rows_keep_the_reporting_order() {
        let tags: Vec<_> = QUERY_ROWS.iter().map(TruthRow::tag).collect();
        assert_eq!(tags, ["TF", "FF", "TT", "FT"]);
    }

    #[test]
    fn encodings_match_the_mode() {
        let row = TruthRow::new(true, false);
        assert_eq!(row.encode(LossMode::Squared), [1.0, -1.0]);
        assert_eq!(row.encode(LossMode::Logistic), [1.0, 0.0]);
        assert_eq!(row.encoded_label(LossMode::Squared), 1.0);
    }
}
