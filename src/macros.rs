/// Implements the conversions and accessors shared by the window-size newtypes.
///
/// The wrapped value is always a `usize` row count.
#[macro_export]
macro_rules! impl_window_newtype {
    ($wrapper:ident) => {
        impl From<usize> for $wrapper {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl From<$wrapper> for usize {
            fn from(wrapper: $wrapper) -> Self {
                wrapper.0
            }
        }

        impl $wrapper {
            /// Number of rows covered by the window.
            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
