use std::fmt;

use log::{error, info};

use crate::error::{unpack_error, ApiError, Failure};
use crate::models::BookId;

/// Lifecycle of a review panel.
///
/// `Idle -> Loading -> Loaded | LoadFailed`, and from a resting state
/// `Submitting | Deleting -> Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStage {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Submitting,
    Deleting,
}

impl fmt::Display for PanelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Loaded => "Loaded",
            Self::LoadFailed => "Load Failed",
            Self::Submitting => "Submitting",
            Self::Deleting => "Deleting",
        };

        f.write_str(r)
    }
}

pub fn update(book_id: &BookId, stage: PanelStage) {
    info!("{}: {}", book_id, stage);
}

pub fn fail(book_id: &BookId, failure: Failure, err: &ApiError) {
    error!("{}: {:?}: {}", book_id, failure, unpack_error(err));
}
