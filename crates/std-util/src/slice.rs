#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let value = &$e;
        assert!(value.is_empty(), "expected empty; actual={:?}", value);
    }};
}
