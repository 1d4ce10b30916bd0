use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpStatus::Idle => "idle",
            OpStatus::Loading => "loading",
            OpStatus::Succeeded => "succeeded",
            OpStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Status and error of one async operation. Each operation owns its own so
/// unrelated flows never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpState {
    pub status: OpStatus,
    pub error: Option<String>,
}

impl OpState {
    pub fn start(&mut self) {
        self.status = OpStatus::Loading;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.status = OpStatus::Succeeded;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = OpStatus::Failed;
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = OpState::default();
    }

    pub fn is_loading(&self) -> bool {
        self.status == OpStatus::Loading
    }

    pub fn is_idle(&self) -> bool {
        self.status == OpStatus::Idle
    }
}
