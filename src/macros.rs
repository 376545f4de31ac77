/// Builds a [`Table`](crate::Table) from column literals.
///
/// Each column is `"name": [values]` or `"name" (unit): [values]`. The column type
/// follows the element type of the values. Evaluates to `pdtable::Result<Table>`.
///
/// # Examples
///
/// ```rust
/// use pdtable::{table, to_string};
///
/// let table = table!("foo" {
///     "place": ["home", "work", "beach"],
///     "distance" ("km"): [0.0, 1.0, 2.0],
/// })
/// .unwrap();
///
/// assert_eq!(
///     to_string(&table).unwrap(),
///     "**foo\nall\nplace;distance\ntext;km\nhome;0\nwork;1\nbeach;2\n\n"
/// );
/// ```
///
/// Destinations can follow the name:
///
/// ```rust
/// use pdtable::table;
///
/// let table = table!("farm" ["your_farm", "my_farm"] {
///     "count" ("pcs"): [2i64, 4],
/// })
/// .unwrap();
/// assert_eq!(table.destinations().len(), 2);
/// assert_eq!(table.column("count").unwrap().unit(), "pcs");
/// ```
#[macro_export]
macro_rules! table {
    (@build $init:expr, $( $col:literal $(($unit:expr))? : [ $($value:expr),* $(,)? ] ),* $(,)?) => {{
        #[allow(clippy::redundant_closure_call)]
        let table = (|| -> $crate::Result<$crate::Table> {
            #[allow(unused_mut)]
            let mut table = $init?;
            $(
                let unit: ::std::option::Option<&str> =
                    ::std::option::Option::None $(.or(::std::option::Option::Some($unit)))?;
                table.add_column($col, vec![$($value),*], unit)?;
            )*
            ::std::result::Result::Ok(table)
        })();
        table
    }};

    // Name with explicit destinations
    ($name:literal [ $($dest:expr),* $(,)? ] { $($body:tt)* }) => {
        $crate::table!(@build
            $crate::Table::new($name).map(|t| {
                t.with_destinations(::std::vec::Vec::<::std::string::String>::from([
                    $(::std::string::String::from($dest)),*
                ]))
            }),
            $($body)*
        )
    };

    // Name only
    ($name:literal { $($body:tt)* }) => {
        $crate::table!(@build $crate::Table::new($name), $($body)*)
    };
}
