//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` / `vote_types` database table. The
//! `name()` string matches the seeded `name` column and is what API
//! responses carry.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $sname:expr ),+ $(,)?
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

            /// Return the seeded lookup-table name for this variant.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $sname ),+
                }
            }

            /// Look a variant up by its database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                $(
                    if id == $val {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_status_enum! {
    /// FAQ item lifecycle status.
    FaqStatus {
        /// Submitted, awaiting enrichment dispatch.
        Pending = 1 => "pending",
        /// Enrichment call is in flight.
        Processing = 2 => "processing",
        /// Enriched, awaiting an admin decision.
        Review = 3 => "review",
        /// Visible to end users.
        Published = 4 => "published",
        /// Turned down by an admin; retryable.
        Rejected = 5 => "rejected",
        /// Enrichment failed; retryable, carries an error message.
        Failed = 6 => "failed",
    }
}

define_status_enum! {
    /// Import job pipeline status. Strictly linear; `Completed`,
    /// `Failed`, and `Timeout` are terminal.
    ImportStatus {
        Pending = 1 => "pending",
        Parsing = 2 => "parsing",
        Generating = 3 => "generating",
        Judging = 4 => "judging",
        Enriching = 5 => "enriching",
        Completed = 6 => "completed",
        Failed = 7 => "failed",
        Timeout = 8 => "timeout",
    }
}

define_status_enum! {
    /// Vote type. A closed enum: the aggregate counter each type feeds is
    /// selected by matching on the variant, never by interpolating a
    /// column name from a string.
    VoteType {
        Upvote = 1 => "upvote",
        Downvote = 2 => "downvote",
    }
}

impl ImportStatus {
    /// Whether this status ends the job (no further transitions).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ImportStatus::Completed | ImportStatus::Failed | ImportStatus::Timeout
        )
    }
}

impl VoteType {
    /// Parse a wire-format vote type string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upvote" => Some(VoteType::Upvote),
            "downvote" => Some(VoteType::Downvote),
            _ => None,
        }
    }
}
