//! Macros for declaring linear state enums.

/// Declare a fieldless enum whose variants form a fixed linear order and
/// implement [`State`](crate::core::State) for it.
///
/// Each variant carries its wire name, which is used for serde, `Display`
/// and `State::name`. Declaration order is the flow order: `next` and
/// `previous` walk it, and `Ord` compares by it.
///
/// # Example
///
/// ```
/// use lockstep::core::State;
/// use lockstep::step_enum;
///
/// step_enum! {
///     pub enum Checkout {
///         Cart => "cart",
///         Payment => "payment",
///         Done => "done",
///     }
///     final: [Done]
/// }
///
/// assert_eq!(Checkout::Cart.next(), Some(Checkout::Payment));
/// assert_eq!(Checkout::Cart.previous(), None);
/// assert_eq!(Checkout::Payment.to_string(), "payment");
/// assert!(Checkout::Done.is_final());
/// ```
#[macro_export]
macro_rules! step_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),+
        }

        impl $name {
            /// Every variant in flow order.
            pub const ORDER: &'static [$name] = &[$(Self::$variant),+];

            /// Zero-based position in the flow.
            pub fn position(self) -> usize {
                self as usize
            }

            /// The variant immediately after this one.
            pub fn next(self) -> Option<Self> {
                Self::ORDER.get(self.position() + 1).copied()
            }

            /// The variant immediately before this one.
            pub fn previous(self) -> Option<Self> {
                self.position()
                    .checked_sub(1)
                    .and_then(|i| Self::ORDER.get(i).copied())
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
