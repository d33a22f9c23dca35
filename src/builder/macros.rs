//! Macros for ergonomic state name declaration.

/// Declare a plain enum usable as a state name.
///
/// Each variant displays as its own name unless a label is given with
/// `=> "label"`. The enum derives every trait [`StateName`] needs plus
/// `Copy` and `Deserialize`, and gets an `ALL` constant listing the
/// variants in declaration order.
///
/// [`StateName`]: crate::core::StateName
///
/// # Example
///
/// ```
/// use cogwork::state_names;
///
/// state_names! {
///     pub enum Symbol {
///         Scan => "scan",
///         OpenParen => "(",
///         CloseParen => ")",
///         Done,
///     }
/// }
///
/// assert_eq!(Symbol::OpenParen.to_string(), "(");
/// assert_eq!(Symbol::Done.label(), "Done");
/// assert_eq!(Symbol::ALL.len(), 4);
/// ```
#[macro_export]
macro_rules! state_names {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(=> $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => {
                        #[allow(unused_variables)]
                        let label: &'static str = stringify!($variant);
                        $(let label: &'static str = $label;)?
                        label
                    })*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
