use gridsearch_core::Coord;

/// One frame of search progress.
///
/// Non-terminal snapshots describe the pending frontier and the explored set
/// at a suspension point. The terminal snapshot additionally carries the
/// reconstructed `path`, start to target inclusive; at most one is produced
/// per run and it is always the last item of the stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub frontier: Vec<Coord>,
    pub explored: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub path: Option<Vec<Coord>>,
}

impl Snapshot {
    /// An intermediate frame.
    pub fn progress(frontier: Vec<Coord>, explored: &[Coord]) -> Self {
        Self {
            frontier,
            explored: explored.to_vec(),
            path: None,
        }
    }

    /// The final frame of a successful run.
    pub fn found(path: Vec<Coord>, explored: &[Coord]) -> Self {
        Self {
            frontier: Vec::new(),
            explored: explored.to_vec(),
            path: Some(path),
        }
    }

    /// Whether this frame ends the run with a path.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.path.is_some()
    }
}
