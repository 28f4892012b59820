pub mod keyvec;
pub mod peek;

/// Snapshot `$output`, attaching the source it was produced from as snapshot info.
#[macro_export]
macro_rules! assert_snapshot_with_source {
    ($source:expr => $output:expr, @$snapshot:literal) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_snapshot!($output, @$snapshot);
        })
    }};
}
