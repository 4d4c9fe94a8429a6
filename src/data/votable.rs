use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::{CatalogError, CatalogResult};
use super::model::{Catalog, NumericColumn, PlanetRecord, NAME_COLUMN};

// ---------------------------------------------------------------------------
// VOTable – raw first table of a VOTable document
// ---------------------------------------------------------------------------

/// A `FIELD` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// `name` attribute, or `ID` when the field has no name.
    pub name: String,
    pub datatype: Option<String>,
    /// Value of `<VALUES null="..."/>`, if declared.
    pub null: Option<String>,
}

/// The first `TABLE` of a VOTable document with TABLEDATA cells kept as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoTable {
    pub fields: Vec<Field>,
    pub rows: Vec<Vec<String>>,
}

/// Parse the first table of a VOTable document.
///
/// Only the TABLEDATA serialization is supported; BINARY, BINARY2 and FITS
/// streams are rejected. `path` is used for error reporting only.
pub fn parse_votable<R: BufRead>(source: R, path: &Path) -> CatalogResult<VoTable> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut table = VoTable::default();
    let mut buf = Vec::new();

    let mut in_table = false;
    let mut seen_table = false;
    let mut current_field: Option<usize> = None;
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<String> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            CatalogError::parse(
                path,
                format!("XML error at byte {}: {e}", reader.error_position()),
            )
        })?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"TABLE" => {
                    in_table = true;
                    seen_table = true;
                }
                b"FIELD" if in_table => {
                    table.fields.push(read_field(&e, path)?);
                    current_field = Some(table.fields.len() - 1);
                }
                b"VALUES" => apply_null(&e, current_field, &mut table, path)?,
                b"BINARY" | b"BINARY2" | b"FITS" if in_table => {
                    return Err(CatalogError::parse(
                        path,
                        "only TABLEDATA serialization is supported",
                    ));
                }
                b"TR" if in_table => row = Some(Vec::with_capacity(table.fields.len())),
                b"TD" if row.is_some() => cell = Some(String::new()),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"FIELD" if in_table => {
                    table.fields.push(read_field(&e, path)?);
                }
                b"VALUES" => apply_null(&e, current_field, &mut table, path)?,
                b"TD" => {
                    if let Some(r) = row.as_mut() {
                        r.push(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if let Some(c) = cell.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| CatalogError::parse(path, e.to_string()))?;
                    c.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(c) = cell.as_mut() {
                    c.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"FIELD" => current_field = None,
                b"TD" => {
                    if let (Some(r), Some(c)) = (row.as_mut(), cell.take()) {
                        r.push(c);
                    }
                }
                b"TR" => {
                    if let Some(r) = row.take() {
                        if r.len() != table.fields.len() {
                            return Err(CatalogError::parse(
                                path,
                                format!(
                                    "row {} has {} cells but the table declares {} fields",
                                    table.rows.len(),
                                    r.len(),
                                    table.fields.len()
                                ),
                            ));
                        }
                        table.rows.push(r);
                    }
                }
                b"TABLE" if in_table => break,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_table {
        return Err(CatalogError::parse(path, "document contains no TABLE element"));
    }
    Ok(table)
}

fn read_field(e: &BytesStart<'_>, path: &Path) -> CatalogResult<Field> {
    let name = match attribute(e, b"name", path)? {
        Some(name) => name,
        None => attribute(e, b"ID", path)?
            .ok_or_else(|| CatalogError::parse(path, "FIELD without name or ID"))?,
    };
    Ok(Field {
        name,
        datatype: attribute(e, b"datatype", path)?,
        null: None,
    })
}

fn apply_null(
    e: &BytesStart<'_>,
    current_field: Option<usize>,
    table: &mut VoTable,
    path: &Path,
) -> CatalogResult<()> {
    if let Some(idx) = current_field {
        if let Some(null) = attribute(e, b"null", path)? {
            table.fields[idx].null = Some(null);
        }
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, key: &[u8], path: &Path) -> CatalogResult<Option<String>> {
    let attr = e
        .try_get_attribute(key)
        .map_err(|err| CatalogError::parse(path, err.to_string()))?;
    match attr {
        Some(attr) => attr
            .unescape_value()
            .map(|v| Some(v.into_owned()))
            .map_err(|err| CatalogError::parse(path, err.to_string())),
        None => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// VOTable → Catalog
// ---------------------------------------------------------------------------

impl VoTable {
    /// Position of the field called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Convert into typed catalog rows. Every column the survey uses must be
    /// declared; other fields are ignored.
    pub fn into_catalog(self, path: &Path) -> CatalogResult<Catalog> {
        let name_idx = self
            .column_index(NAME_COLUMN)
            .ok_or_else(|| CatalogError::schema(path, NAME_COLUMN))?;
        let numeric_idx: Vec<(NumericColumn, usize)> = NumericColumn::ALL
            .iter()
            .map(|&col| {
                self.column_index(col.name())
                    .map(|idx| (col, idx))
                    .ok_or_else(|| CatalogError::schema(path, col.name()))
            })
            .collect::<CatalogResult<_>>()?;
        for &(col, idx) in &numeric_idx {
            let field = &self.fields[idx];
            if !field.is_numeric() {
                return Err(CatalogError::parse(
                    path,
                    format!(
                        "column '{col}' is declared as '{}', expected a numeric datatype",
                        field.datatype.as_deref().unwrap_or_default()
                    ),
                ));
            }
        }

        let mut records = Vec::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter().enumerate() {
            let mut record = PlanetRecord {
                pl_name: text_cell(&row[name_idx], &self.fields[name_idx]),
                ..Default::default()
            };
            for &(col, idx) in &numeric_idx {
                let value = numeric_cell(&row[idx], &self.fields[idx]).ok_or_else(|| {
                    CatalogError::parse(
                        path,
                        format!("row {row_no}, column '{col}': '{}' is not a number", row[idx]),
                    )
                })?;
                record.set(col, value);
            }
            records.push(record);
        }
        Ok(Catalog::new(records))
    }
}

impl Field {
    /// Whether the declared datatype holds numbers. Fields without a
    /// datatype are accepted and checked cell by cell.
    pub fn is_numeric(&self) -> bool {
        match self.datatype.as_deref() {
            None => true,
            Some(dt) => matches!(
                dt,
                "unsignedByte" | "short" | "int" | "long" | "float" | "double"
            ),
        }
    }
}

fn is_null(raw: &str, field: &Field) -> bool {
    raw.is_empty() || field.null.as_deref() == Some(raw)
}

fn text_cell(raw: &str, field: &Field) -> Option<String> {
    let raw = raw.trim();
    (!is_null(raw, field)).then(|| raw.to_string())
}

/// `Some(None)` for a missing value, `None` when the cell is not numeric.
fn numeric_cell(raw: &str, field: &Field) -> Option<Option<f64>> {
    let raw = raw.trim();
    if is_null(raw, field) || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    raw.parse::<f64>().ok().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "test.xml";

    fn header(extra_fields: &str) -> String {
        let mut fields = String::from(
            r#"<FIELD name="pl_name" datatype="char" arraysize="*"/>"#,
        );
        for col in NumericColumn::ALL {
            if col == NumericColumn::EquilibriumTemp {
                fields.push_str(&format!(
                    r#"<FIELD name="{col}" datatype="int"><VALUES null="-99"/></FIELD>"#
                ));
            } else {
                fields.push_str(&format!(r#"<FIELD name="{col}" datatype="double"/>"#));
            }
        }
        fields.push_str(extra_fields);
        fields
    }

    fn document(fields: &str, rows: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.4" xmlns="http://www.ivoa.net/xml/VOTable/v1.3">
  <RESOURCE type="results">
    <TABLE>
      <DESCRIPTION>Planetary Systems</DESCRIPTION>
      {fields}
      <DATA><TABLEDATA>
      {rows}
      </TABLEDATA></DATA>
    </TABLE>
  </RESOURCE>
</VOTABLE>"#
        )
    }

    fn row(name: &str, values: [&str; 13]) -> String {
        let mut tr = format!("<TR><TD>{name}</TD>");
        for v in values {
            if v.is_empty() {
                tr.push_str("<TD/>");
            } else {
                tr.push_str(&format!("<TD>{v}</TD>"));
            }
        }
        tr.push_str("</TR>");
        tr
    }

    fn parse(doc: &str) -> CatalogResult<VoTable> {
        parse_votable(doc.as_bytes(), Path::new(PATH))
    }

    #[test]
    fn parses_fields_and_rows() {
        let values = [
            "112.3", "0.409", "1.34", "", "0.04", "0.7", "233", "4402", "0.6", "0.61", "4.67",
            "370.46", "13.5",
        ];
        let doc = document(&header(""), &row("Kepler-442 b", values));
        let table = parse(&doc).unwrap();
        assert_eq!(table.fields.len(), 14);
        assert_eq!(table.fields[7].null.as_deref(), Some("-99"));
        assert_eq!(table.rows.len(), 1);

        let catalog = table.into_catalog(Path::new(PATH)).unwrap();
        let rec = &catalog.records[0];
        assert_eq!(rec.pl_name.as_deref(), Some("Kepler-442 b"));
        assert_eq!(rec.pl_orbper, Some(112.3));
        assert_eq!(rec.pl_bmasse, None);
        assert_eq!(rec.pl_eqt, Some(233.0));
        assert_eq!(rec.sy_dist, Some(370.46));
    }

    #[test]
    fn null_sentinels_and_nan_become_missing() {
        let values = [
            "NaN", "", "", "", "", "", "-99", "", "", "", "", "nan", "",
        ];
        let doc = document(&header(""), &row("TOI-700 d", values));
        let catalog = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap();
        let rec = &catalog.records[0];
        assert_eq!(rec.pl_orbper, None);
        assert_eq!(rec.pl_eqt, None);
        assert_eq!(rec.sy_dist, None);
    }

    #[test]
    fn field_without_name_falls_back_to_id() {
        let doc = document(r#"<FIELD ID="pl_name" datatype="char"/>"#, "");
        let table = parse(&doc).unwrap();
        assert_eq!(table.column_index("pl_name"), Some(0));
    }

    #[test]
    fn char_typed_numeric_column_is_rejected() {
        let fields = header("").replace(
            r#"<FIELD name="sy_dist" datatype="double"/>"#,
            r#"<FIELD name="sy_dist" datatype="char" arraysize="*"/>"#,
        );
        let mut values = [""; 13];
        values[11] = "12.4";
        let doc = document(&fields, &row("Gliese 12 b", values));
        let err = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap_err();
        match err {
            CatalogError::Parse { message, .. } => assert!(message.contains("sy_dist")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn integer_datatypes_are_numeric() {
        for dt in ["short", "int", "long", "float", "double"] {
            let field = Field {
                name: "st_teff".to_string(),
                datatype: Some(dt.to_string()),
                null: None,
            };
            assert!(field.is_numeric(), "{dt}");
        }
        let untyped = Field {
            name: "st_teff".to_string(),
            datatype: None,
            null: None,
        };
        assert!(untyped.is_numeric());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let mut values = vec!["1"; 13];
        values[0] = "10.0";
        let mut tr = row("K2-18 b", values.try_into().unwrap());
        tr = tr.replace("</TR>", "<TD>ignored</TD></TR>");
        let doc = document(&header(r#"<FIELD name="hostname" datatype="char"/>"#), &tr);
        let catalog = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap();
        assert_eq!(catalog.records[0].pl_orbper, Some(10.0));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let fields = header("").replace(r#"<FIELD name="sy_dist" datatype="double"/>"#, "");
        let doc = document(&fields, "");
        let err = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap_err();
        match err {
            CatalogError::Schema { column, .. } => assert_eq!(column, "sy_dist"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let doc = document(&header(""), "<TR><TD>Kepler-62 f</TD><TD>267.3</TD></TR>");
        assert!(matches!(parse(&doc), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn non_numeric_cell_is_a_parse_error() {
        let mut values = [""; 13];
        values[11] = "far";
        let doc = document(&header(""), &row("Kepler-186 f", values));
        let err = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn binary_serialization_is_rejected() {
        let doc = document(&header(""), "").replace(
            "<TABLEDATA>",
            "<BINARY><STREAM encoding=\"base64\">AAAA</STREAM></BINARY><TABLEDATA>",
        );
        assert!(matches!(parse(&doc), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let doc = "<VOTABLE><RESOURCE><TABLE><FIELD name=\"a\"></TABLE>";
        assert!(matches!(parse(doc), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn document_without_table_is_a_parse_error() {
        let doc = "<VOTABLE><RESOURCE/></VOTABLE>";
        assert!(matches!(parse(doc), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn only_first_table_is_read() {
        let first = document(&header(""), &row("Kepler-1649 c", [""; 13]));
        let doc = first.replace(
            "</RESOURCE>",
            "<TABLE><FIELD name=\"other\"/><DATA><TABLEDATA><TR><TD>x</TD></TR></TABLEDATA></DATA></TABLE></RESOURCE>",
        );
        let table = parse(&doc).unwrap();
        assert_eq!(table.fields.len(), 14);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn escaped_text_is_unescaped() {
        let doc = document(&header(""), &row("Planet &amp; Co", [""; 13]));
        let catalog = parse(&doc).unwrap().into_catalog(Path::new(PATH)).unwrap();
        assert_eq!(catalog.records[0].pl_name.as_deref(), Some("Planet & Co"));
    }
}
