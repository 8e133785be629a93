//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Report lifecycle status. Monotonic: Generating reaches exactly one
    /// terminal state and never leaves it.
    ReportStatus {
        Generating = 1,
        Completed = 2,
        Failed = 3,
    }
}

define_status_enum! {
    /// Schedule lifecycle status. Only Active is produced by the engine;
    /// pause/cancel transitions belong to the external scheduler.
    ScheduleStatus {
        Active = 1,
        Paused = 2,
        Cancelled = 3,
    }
}

impl ReportStatus {
    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReportStatus::Completed | ReportStatus::Failed)
    }

    /// Whether a transition to `to` is allowed. The only legal moves are
    /// Generating -> Completed and Generating -> Failed.
    pub fn can_transition_to(self, to: ReportStatus) -> bool {
        matches!(self, ReportStatus::Generating) && to.is_terminal()
    }

    /// Resolve a raw status id back to the enum, for rows read from the
    /// database.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(ReportStatus::Generating),
            2 => Some(ReportStatus::Completed),
            3 => Some(ReportStatus::Failed),
            _ => None,
        }
    }
}
