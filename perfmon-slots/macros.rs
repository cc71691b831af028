//! Declarative macros shared across the crate

/// Define an enum with name() and all() methods, plus custom data per variant
///
/// # Example
/// ```
/// use perfmon::enum_with_data;
///
/// enum_with_data! {
///     pub enum CacheEvent: u16 {
///         L1dRefill => ("L1D_CACHE_REFILL", 0x03),
///         L1dAccess => ("L1D_CACHE", 0x04),
///     }
///     impl code -> u16
/// }
///
/// let event = CacheEvent::L1dRefill;
/// assert_eq!(event.name(), "L1D_CACHE_REFILL");
/// assert_eq!(event.code(), 0x03);
/// assert_eq!(CacheEvent::all().len(), 2);
/// ```
#[macro_export]
macro_rules! enum_with_data {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $data_type:ty {
            $($variant:ident => ($str:literal, $data:expr)),* $(,)?
        }
        impl $method:ident -> $return_type:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)*
                }
            }

            pub fn $method(&self) -> $return_type {
                match self {
                    $($name::$variant => $data,)*
                }
            }

            pub fn all() -> Vec<$name> {
                vec![$($name::$variant,)*]
            }
        }
    };
}
