//! Table extraction: locate the data table, infer headers, build records.
//!
//! Header inference, in priority order:
//! 1. the header row of an explicit `<thead>`
//! 2. the first row of the table (data then starts at the second row)
//! 3. a fixed `product` / `value` pair

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::record::YearRecord;
use crate::value::normalize;

/// The data table carries both of these classes
pub const TABLE_SELECTOR: &str = "table.tb_base.tb_dados";

/// Headers used when the table has no rows at all
pub const FALLBACK_HEADERS: [&str; 2] = ["product", "value"];

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(TABLE_SELECTOR).expect("table selector is valid"));
static HEAD_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead tr").expect("thead selector is valid"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("tr selector is valid"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("cell selector is valid"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("td selector is valid"));

/// Records extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTable {
    pub headers: Vec<String>,
    pub records: Vec<YearRecord>,
    /// Cells that looked numeric but failed to parse
    pub degraded_cells: usize,
}

/// Positional name for a column with no header
pub fn positional_name(index: usize) -> String {
    format!("column_{}", index)
}

/// Cell text: each descendant text node trimmed, then concatenated
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

fn is_in_thead(row: &ElementRef<'_>) -> bool {
    row.ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|el| el.name() == "thead")
}

fn header_labels(row: ElementRef<'_>) -> Vec<String> {
    row.select(&HEADER_CELL)
        .enumerate()
        .map(|(i, cell)| {
            let text = cell_text(cell);
            if text.is_empty() {
                positional_name(i)
            } else {
                text
            }
        })
        .collect()
}

/// Parse `html` and turn the data table into records for `year`.
pub fn extract_records(html: &str, year: i32) -> Result<ExtractedTable> {
    let document = Html::parse_document(html);

    let table = document
        .select(&TABLE)
        .next()
        .ok_or(ScrapeError::TableNotFound { year })?;

    let explicit_header = table
        .select(&HEAD_ROW)
        .find(|row| row.select(&HEADER_CELL).next().is_some());

    let (headers, data_rows): (Vec<String>, Vec<ElementRef<'_>>) = match explicit_header {
        Some(head) => (
            header_labels(head),
            table.select(&ROW).filter(|row| !is_in_thead(row)).collect(),
        ),
        None => {
            let mut rows = table.select(&ROW);
            match rows.next() {
                Some(first) => (header_labels(first), rows.collect()),
                None => (
                    FALLBACK_HEADERS.iter().map(|h| h.to_string()).collect(),
                    Vec::new(),
                ),
            }
        }
    };

    let mut out = ExtractedTable {
        headers,
        ..Default::default()
    };

    for row in data_rows {
        let cells: Vec<ElementRef<'_>> = row.select(&DATA_CELL).collect();
        if cells.is_empty() {
            continue;
        }

        let mut record = YearRecord::new(year);
        for (i, cell) in cells.into_iter().enumerate() {
            let text = cell_text(cell);
            let normalized = normalize(&text);
            if normalized.degraded {
                warn!(year, column = i, text = %text, "Numeric cell failed to parse, using 0.0");
                out.degraded_cells += 1;
            }
            let name = out
                .headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| positional_name(i));
            record.insert(name, normalized.value);
        }
        out.records.push(record);
    }

    debug!(
        year,
        headers = out.headers.len(),
        records = out.records.len(),
        "Extracted table"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn page(table: &str) -> String {
        format!(
            "<html><body><div class=\"content\">{}</div></body></html>",
            table
        )
    }

    #[test]
    fn test_explicit_header_row() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <thead><tr><th>Produto</th><th>Quantidade (L)</th></tr></thead>
                <tbody><tr><td>Tinto</td><td>1.500,00</td></tr></tbody>
            </table>"#,
        );

        let table = extract_records(&html, 2020).unwrap();
        assert_eq!(table.headers, vec!["Produto", "Quantidade (L)"]);
        assert_eq!(table.records.len(), 1);

        let json = serde_json::to_string(&table.records[0]).unwrap();
        assert_eq!(
            json,
            r#"{"year":2020,"Produto":"Tinto","Quantidade (L)":1500.0}"#
        );
    }

    #[test]
    fn test_first_row_as_headers() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <tr><td>Produto</td><td>Quantidade</td></tr>
                <tr><td>Branco</td><td>200</td></tr>
            </table>"#,
        );

        let table = extract_records(&html, 2021).unwrap();
        assert_eq!(table.records.len(), 1);
        let record = &table.records[0];
        assert_eq!(record.year(), 2021);
        assert_eq!(record.get("Produto"), Some(Value::Text("Branco".into())));
        assert_eq!(record.get("Quantidade"), Some(Value::Integer(200)));
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_empty_table_uses_fallback_headers() {
        let html = page(r#"<table class="tb_base tb_dados"></table>"#);
        let table = extract_records(&html, 2000).unwrap();
        assert_eq!(table.headers, vec!["product", "value"]);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_missing_table() {
        let html = page(r#"<table class="tb_base"><tr><td>x</td></tr></table>"#);
        let err = extract_records(&html, 1999).unwrap_err();
        assert!(matches!(err, ScrapeError::TableNotFound { year: 1999 }));
    }

    #[test]
    fn test_excess_cells_get_positional_names() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <thead><tr><th>Países</th><th>Quantidade (Kg)</th></tr></thead>
                <tbody><tr><td>Chile</td><td>10</td><td>2.345</td></tr></tbody>
            </table>"#,
        );

        let table = extract_records(&html, 2010).unwrap();
        let record = &table.records[0];
        assert_eq!(record.get("column_2"), Some(Value::Integer(2345)));
        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["year", "Países", "Quantidade (Kg)", "column_2"]);
    }

    #[test]
    fn test_rows_without_data_cells_are_skipped_and_order_kept() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <thead><tr><th>Produto</th><th>Quantidade (L.)</th></tr></thead>
                <tbody>
                    <tr>
                        <td class="tb_item">VINHO DE MESA</td>
                        <td class="tb_item">169.762.429</td>
                    </tr>
                    <tr><th>separator</th></tr>
                    <tr></tr>
                    <tr>
                        <td class="tb_subitem">  Tinto </td>
                        <td class="tb_subitem">139.320.884</td>
                    </tr>
                </tbody>
                <tfoot><tr><td>Total</td><td>457.792.870</td></tr></tfoot>
            </table>"#,
        );

        let table = extract_records(&html, 2022).unwrap();
        let products: Vec<Value> = table
            .records
            .iter()
            .filter_map(|r| r.get("Produto"))
            .collect();
        assert_eq!(
            products,
            vec![
                Value::Text("VINHO DE MESA".into()),
                Value::Text("Tinto".into()),
                Value::Text("Total".into()),
            ]
        );
        assert_eq!(
            table.records[2].get("Quantidade (L.)"),
            Some(Value::Integer(457_792_870))
        );
    }

    #[test]
    fn test_nested_cell_text_is_joined() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <thead><tr><th><b> Produto </b></th></tr></thead>
                <tbody><tr><td><span>Suco </span><span> de uva</span></td></tr></tbody>
            </table>"#,
        );

        let table = extract_records(&html, 2015).unwrap();
        assert_eq!(
            table.records[0].get("Produto"),
            Some(Value::Text("Sucode uva".into()))
        );
    }

    #[test]
    fn test_degraded_cells_are_counted() {
        let html = page(
            r#"<table class="tb_base tb_dados">
                <thead><tr><th>Produto</th><th>Valor</th></tr></thead>
                <tbody><tr><td>Espumante</td><td>1,2,3</td></tr></tbody>
            </table>"#,
        );

        let table = extract_records(&html, 2018).unwrap();
        assert_eq!(table.degraded_cells, 1);
        assert_eq!(table.records[0].get("Valor"), Some(Value::Float(0.0)));
    }
}
