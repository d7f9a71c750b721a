//! Macros for building record maps

/// Build a [`RecordMap`](crate::RecordMap) from `key => value` pairs
///
/// Each value is wrapped with [`Value::new`](crate::Value::new), so its
/// concrete type is whatever the expression evaluates to. Integer literals
/// need a suffix when the target field is not `i32`.
///
/// # Example
///
/// ```rust
/// use rowmap::record_map;
///
/// let row = record_map! {
///     "id" => 7_i64,
///     "Address_City" => "Aarhus".to_string(),
/// };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! record_map {
    () => {
        $crate::RecordMap::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {
        {
            let mut map = $crate::RecordMap::new();
            $(
                map.insert(::std::string::String::from($key), $crate::Value::new($value));
            )+
            map
        }
    };
}
