//! Utility macros for reducing boilerplate

/// Implement `FromRef<AppState>` so a field can be extracted on its own.
///
/// # Example
/// ```ignore
/// impl_from_ref!(Arc<Coordinator>, coordinator);
/// // Expands to:
/// impl axum::extract::FromRef<AppState> for Arc<Coordinator> {
///     fn from_ref(state: &AppState) -> Self {
///         state.coordinator.clone()
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_from_ref {
    ($type:ty, $field:ident) => {
        impl axum::extract::FromRef<$crate::state::AppState> for $type {
            fn from_ref(state: &$crate::state::AppState) -> Self {
                state.$field.clone()
            }
        }
    };
}
