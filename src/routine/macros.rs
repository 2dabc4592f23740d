//! Macros for declaring per-screen action codes.

/// Generate an action enum with fixed integer codes.
///
/// The generated type has `decode`, which maps an [`ActionCode`] back to a
/// variant (returning `None` for codes the screen does not know), and
/// `code`, which gives a variant's wire value.
///
/// [`ActionCode`]: crate::registry::ActionCode
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            #[allow(dead_code)]
            $vis fn decode(code: $crate::registry::ActionCode) -> Option<Self> {
                match code.get() {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            #[allow(dead_code)]
            $vis fn code(self) -> $crate::registry::ActionCode {
                match self {
                    $(Self::$variant => $crate::registry::ActionCode::new($code)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::registry::ActionCode;

    action_enum! {
        enum TestAction {
            Back = 1,
            Next = 3,
        }
    }

    #[test]
    fn action_enum_decodes_known_codes() {
        assert_eq!(TestAction::decode(ActionCode::new(1)), Some(TestAction::Back));
        assert_eq!(TestAction::decode(ActionCode::new(3)), Some(TestAction::Next));
        assert_eq!(TestAction::decode(ActionCode::new(2)), None);
    }

    #[test]
    fn action_enum_codes_round_trip() {
        for action in [TestAction::Back, TestAction::Next] {
            assert_eq!(TestAction::decode(action.code()), Some(action));
        }
    }

    #[test]
    fn action_enum_supports_visibility() {
        action_enum! {
            pub enum PublicAction {
                Go = 7,
            }
        }

        assert_eq!(PublicAction::Go.code(), ActionCode::new(7));
    }
}
