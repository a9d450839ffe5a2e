use std::fmt;

/// Kind of entity a feature level can require or remove.
///
/// The registry spells these `type`, `enum` and `command`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Type,
    Constant,
    Function,
}

impl EntityKind {
    /// All kinds, in the order features list them.
    pub const ALL: [EntityKind; 3] = [EntityKind::Type, EntityKind::Constant, EntityKind::Function];

    /// Map a require/remove child tag to its kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "type" => Some(EntityKind::Type),
            "enum" => Some(EntityKind::Constant),
            "command" => Some(EntityKind::Function),
            _ => None,
        }
    }

    /// The registry tag for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            EntityKind::Type => "type",
            EntityKind::Constant => "enum",
            EntityKind::Function => "command",
        }
    }

    /// Human-readable label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Type => "type",
            EntityKind::Constant => "constant",
            EntityKind::Function => "function",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
