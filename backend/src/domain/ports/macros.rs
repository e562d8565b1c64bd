//! `define_port_error!`: declares a `thiserror` enum for a port family and
//! generates one snake_case constructor per variant, so adapters can write
//! `RepositoryError::duplicate_key("courses_code_key")`.

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

    (
        @ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*)
        $field:ident : $ty:ty, $($rest:tt)*
    ) => {
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
    define_port_error! {
        pub enum LedgerPortError {
            Unreachable => "ledger unreachable",
            Rejected { reason: String } => "rejected: {reason}",
            Capacity { limit: u32 } => "over capacity ({limit})",
            Conflict { key: String, attempts: u32 } => "{key} still conflicting after {attempts}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LedgerPortError::unreachable(), LedgerPortError::Unreachable);
        assert_eq!(LedgerPortError::unreachable().to_string(), "ledger unreachable");
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        let err = LedgerPortError::rejected("closed term");
        assert_eq!(err.to_string(), "rejected: closed term");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        assert_eq!(LedgerPortError::capacity(3_u32).to_string(), "over capacity (3)");
        let err = LedgerPortError::conflict("enrollments_pkey", 2_u32);
        assert_eq!(err.to_string(), "enrollments_pkey still conflicting after 2");
    }
}
