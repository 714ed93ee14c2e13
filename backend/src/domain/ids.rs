//! Store-assigned record identifiers.

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw database identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_record_id! {
    /// Identifier of a [`Post`](super::Post).
    PostId
}

define_record_id! {
    /// Identifier of a [`Category`](super::Category).
    CategoryId
}

define_record_id! {
    /// Identifier of a [`Location`](super::Location).
    LocationId
}

define_record_id! {
    /// Identifier of a [`Comment`](super::Comment).
    CommentId
}
