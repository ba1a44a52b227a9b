/// Automatically implements std::fmt::Display and std::str::FromStr on an enum
/// using custom-specified string representations.
macro_rules! enum_with_str_repr {
    (
        // For each enum ...
        $(
            // Get enum attributes (including #[derive] and docs).
            $(#[$enum_attr:meta])*
            // Get enum definition line.
            $vis:vis enum $enum_name:ident {
                // For each variant ...
                $(
                    // Get variant attributes (including docs).
                    $(#[$variant_attr:meta])*
                    // Get the variant name and its string representation.
                    $variant_name:ident = $variant_str:expr
                ),*
                $(,)?
            }
        )*
    ) => {
        // For each enum ...
        $(
            $(#[$enum_attr])*
            $vis enum $enum_name {
                $(
                    $(#[$variant_attr])*
                    $variant_name,
                )*
            }
            impl $enum_name {
                /// Every variant, in declaration order.
                pub const ALL: &'static [Self] = &[$(<$enum_name>::$variant_name),*];

                /// Returns the source text of this token.
                pub fn as_str(self) -> &'static str {
                    match self {
                        $(
                            <$enum_name>::$variant_name => $variant_str,
                        )*
                    }
                }
            }
            impl std::fmt::Display for $enum_name {
                fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
            impl std::str::FromStr for $enum_name {
                type Err = ();
                fn from_str(s: &str) -> Result<Self, ()> {
                    match s {
                        $(
                            $variant_str => Ok(<$enum_name>::$variant_name),
                        )*
                        _ => Err(()),
                    }
                }
            }
        )*
    }
}
