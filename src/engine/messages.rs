use serde::{Deserialize, Serialize};

use crate::ai::ComputerMove;
use crate::game::MoveReport;

/// Requests sent from the front end to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all = "kebab-case")]
pub enum Request {
    Reset,
    HumanMove {
        #[serde(rename = "col")]
        column: usize,
    },
    ComputerMove {
        #[serde(rename = "maxDepth")]
        max_depth: usize,
    },
}

/// Computer move outcome plus the search's outlook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerMoveReport {
    #[serde(flatten)]
    pub report: MoveReport,
    pub is_win_imminent: bool,
    pub is_loss_imminent: bool,
}

impl From<ComputerMove> for ComputerMoveReport {
    fn from(played: ComputerMove) -> Self {
        ComputerMoveReport {
            report: played.report,
            is_win_imminent: played.decision.is_win_imminent,
            is_loss_imminent: played.decision.is_loss_imminent,
        }
    }
}

/// Messages sent from the engine to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all = "kebab-case")]
pub enum Response {
    ResetDone,
    HumanMoveDone(MoveReport),
    ComputerMoveDone(ComputerMoveReport),
    /// Top-level column under evaluation, sent while a computer move is searched.
    Progress {
        #[serde(rename = "col")]
        column: usize,
    },
    Error {
        message: String,
    },
}
