//! Action definitions

/// Everything the sandbox responds to
///
/// Default bindings:
/// - A / Left = MoveLeft
/// - D / Right = MoveRight
/// - Space / W = Jump
/// - Tab = ToggleEdit
/// - 1 = RemoveNode (edit mode)
/// - Left mouse = Primary (grab outside edit mode)
/// - Right mouse = Secondary (rotate in edit mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    ToggleEdit,
    RemoveNode,
    Primary,
    Secondary,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ToggleEdit,
        Action::RemoveNode,
        Action::Primary,
        Action::Secondary,
    ];

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Small set of actions, one bit each
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Builder form of `insert`
    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::EMPTY;
        for action in iter {
            set.insert(action);
        }
        set
    }
}
