
use crate::romaji::RomajiTable;
use crate::rows::RowTable;

/// A deliberately small table pair, independent of the embedded defaults.
pub(super) fn small_tables() -> (RomajiTable, RowTable) {
    let romaji = RomajiTable::from_toml(
        r#"
[mappings]
"か" = "ka"
"き" = "ki"
"ん" = "n"
"#,
    )
    .unwrap();
    let rows = RowTable::from_toml(
        r#"
[rows.wa]
a = "わ"
i = "ゐ"
u = "う"
e = "ゑ"
o = "を"
n = "ん"
"#,
    )
    .unwrap();
    (romaji, rows)
}
