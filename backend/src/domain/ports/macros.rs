//! Defines helper macros for generating domain port error enums.
//!
//! Each variant gets a snake_case constructor accepting `impl Into<T>` for
//! every field, so adapters can write `PersistenceError::query("...")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $(
                    #[doc = concat!("The `", stringify!($field), "` detail.")]
                    $field : $ty
                ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for port error enums.
    define_port_error! {
        pub enum StoreError {
            Missing { entity: String } => "{entity} not found",
            Conflict { constraint: String, attempts: u32 } =>
                "conflict on {constraint} after {attempts} attempts",
            Closed => "store closed",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoreError::missing("post");
        assert_eq!(err.to_string(), "post not found");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoreError::conflict("categories_slug_key", 2_u32);
        assert_eq!(
            err.to_string(),
            "conflict on categories_slug_key after 2 attempts"
        );
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::closed(), StoreError::Closed);
    }
}
