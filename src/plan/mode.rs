use std::fmt;
use std::str::FromStr;

use crate::common::{Error, ValidationSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        })
    }
}

/// Which kinds of operation a run may plan.
///
/// * append: only create missing records
/// * update: only update records that already exist
/// * upgrade: create and update, never remove
/// * replace: make the provider match the configuration exactly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Append,
    Update,
    Upgrade,
    Replace,
}

impl Mode {
    pub const NAMES: [&'static str; 4] = ["append", "update", "upgrade", "replace"];

    pub fn allows(self, kind: OperationKind) -> bool {
        use OperationKind::*;

        match self {
            Mode::Append => matches!(kind, Create),
            Mode::Update => matches!(kind, Update),
            Mode::Upgrade => matches!(kind, Create | Update),
            Mode::Replace => matches!(kind, Create | Update | Delete),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Append => "append",
            Mode::Update => "update",
            Mode::Upgrade => "upgrade",
            Mode::Replace => "replace",
        })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(Mode::Append),
            "update" => Ok(Mode::Update),
            "upgrade" => Ok(Mode::Upgrade),
            "replace" => Ok(Mode::Replace),
            other => ValidationSnafu {
                message: format!("unknown mode '{other}'"),
            }
            .fail(),
        }
    }
}
