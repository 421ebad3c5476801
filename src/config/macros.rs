/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` defines a configuration struct with embedded defaults in
/// a single declaration and generates:
/// - The struct with public fields
/// - The Default implementation
/// - Serde support with `#[serde(default)]` so partial TOML files load
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct PaginationConfig {
///         default_page_size: usize = 10,
///         max_page_size: usize = 100,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
