//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
                $variant $( { $($field : $ty),* } )?,
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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum LedgerPortError {
            Missing { record: String } => "missing record: {record}",
            Truncated { expected: u32 } => "truncated after {expected} entries",
            Rejected { record: String, attempts: u32 } => "rejected {record} after {attempts} attempts",
            Offline => "ledger offline",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerPortError::missing("posts");
        assert_eq!(err.to_string(), "missing record: posts");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = LedgerPortError::truncated(3_u32);
        assert_eq!(err.to_string(), "truncated after 3 entries");
    }

    #[test]
    fn mixed_fields_are_passed_in_order() {
        let err = LedgerPortError::rejected("users", 2_u32);
        assert_eq!(err.to_string(), "rejected users after 2 attempts");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::offline(), LedgerPortError::Offline);
    }
}
