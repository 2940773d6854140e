//! Macros for declaring state and event kinds.

/// Declare unit kinds and implement [`Kind`](crate::core::Kind) for them.
///
/// Each declared struct derives `Clone`, `Copy`, `Debug`, `Default`,
/// `PartialEq`, `Eq` and `Hash`.
///
/// # Example
///
/// ```
/// use switchyard::core::KindId;
/// use switchyard::kinds;
///
/// kinds! {
///     /// Drawer is open
///     pub struct Open;
///     pub struct Empty;
///     struct OpenClose;
/// }
///
/// assert_ne!(KindId::of::<Open>(), KindId::of::<Empty>());
/// assert_eq!(KindId::of::<OpenClose>().name(), "OpenClose");
/// ```
#[macro_export]
macro_rules! kinds {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis struct $name:ident;
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            $vis struct $name;

            $crate::impl_kind!($name);
        )*
    };
}

/// Implement [`Kind`](crate::core::Kind) for existing types, typically
/// events that carry data.
///
/// # Example
///
/// ```
/// use switchyard::core::KindId;
/// use switchyard::impl_kind;
///
/// struct CdDetected {
///     title: String,
/// }
///
/// struct Eject;
///
/// impl_kind!(CdDetected, Eject);
///
/// assert_ne!(KindId::of::<CdDetected>(), KindId::of::<Eject>());
/// ```
#[macro_export]
macro_rules! impl_kind {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::core::Kind for $ty {
                type Base = Self;

                fn base(&self) -> &Self::Base {
                    self
                }
            }
        )+
    };
}
