//! Macros for ergonomic trigger declaration.

/// Declare a trigger enum usable with any machine.
///
/// Derives `Clone, Copy, PartialEq, Eq, Debug` and adds a `name()`
/// accessor and a `Display` impl printing that name.
///
/// # Example
///
/// ```
/// use instate::trigger_enum;
///
/// trigger_enum! {
///     pub enum Bell {
///         Start,
///         Finish,
///     }
/// }
///
/// assert_eq!(Bell::Finish.name(), "Finish");
/// assert_eq!(Bell::Start.to_string(), "Start");
/// ```
#[macro_export]
macro_rules! trigger_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
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
            /// Variant name, as written in the declaration.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Trigger;

    trigger_enum! {
        enum Bell {
            Start,
            Finish,
        }
    }

    fn assert_trigger<T: Trigger>(_: &T) {}

    #[test]
    fn trigger_enum_macro_generates_names() {
        assert_eq!(Bell::Start.name(), "Start");
        assert_eq!(Bell::Finish.to_string(), "Finish");
        assert_eq!(format!("{:?}", Bell::Finish), "Finish");
    }

    #[test]
    fn generated_enum_is_a_trigger() {
        assert_trigger(&Bell::Start);
        assert_ne!(Bell::Start, Bell::Finish);
    }

    #[test]
    fn trigger_enum_supports_visibility() {
        trigger_enum! {
            pub enum PublicBell {
                Ring,
            }
        }

        assert_eq!(PublicBell::Ring.name(), "Ring");
    }
}
