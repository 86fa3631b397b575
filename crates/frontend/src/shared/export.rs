//! Export hand-off: shape the visible rows into flat records matching the
//! column definitions, then hand them to the browser — XLS as a CSV blob
//! download, PDF as a print-ready document in a new window. Format
//! internals stay outside this module.

use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::shared::components::data_table::{column_text, ColumnDef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Xls,
}

/// Flatten rows into text records in column order.
pub fn shape_rows(columns: &[ColumnDef], rows: &[Value]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| column_text(row, column))
                .collect()
        })
        .collect()
}

/// Export the given rows and trigger the browser-side hand-off.
pub fn export_rows(
    format: ExportFormat,
    columns: &[ColumnDef],
    rows: &[Value],
    filename_hint: &str,
) -> Result<(), String> {
    if rows.is_empty() {
        return Err("No data to export".to_string());
    }
    let headers: Vec<&str> = columns.iter().map(|c| c.title).collect();
    let records = shape_rows(columns, rows);
    match format {
        ExportFormat::Xls => {
            let csv = build_csv(&headers, &records);
            download_blob(&csv, "text/csv;charset=utf-8;", &format!("{}.csv", filename_hint))
        }
        ExportFormat::Pdf => {
            let html = build_print_html(filename_hint, &headers, &records);
            open_in_new_tab(&html)
        }
    }
}

/// Semicolon-separated CSV with a UTF-8 BOM so Excel renders non-ASCII
/// text correctly.
fn build_csv(headers: &[&str], records: &[Vec<String>]) -> String {
    let mut content = String::new();
    content.push('\u{FEFF}');
    content.push_str(&headers.join(";"));
    content.push('\n');
    for record in records {
        let escaped: Vec<String> = record.iter().map(|cell| escape_csv_cell(cell)).collect();
        content.push_str(&escaped.join(";"));
        content.push('\n');
    }
    content
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn build_print_html(title: &str, headers: &[&str], records: &[Vec<String>]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
    html.push_str(&format!("<title>{}</title>", escape_html(title)));
    html.push_str(
        "<style>table{border-collapse:collapse;width:100%}td,th{border:1px solid #999;padding:4px 8px;font:12px sans-serif}</style>",
    );
    html.push_str("</head><body onload=\"window.print()\"><table><thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead><tbody>");
    for record in records {
        html.push_str("<tr>");
        for cell in record {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></body></html>");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));
    let properties = BlobPropertyBag::new();
    properties.set_type(mime);
    Blob::new_with_str_sequence_and_options(&parts, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(content: &str, mime: &str, filename: &str) -> Result<(), String> {
    let blob = create_blob(content, mime)?;
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    Ok(())
}

fn open_in_new_tab(html: &str) -> Result<(), String> {
    let blob = create_blob(html, "text/html;charset=utf-8;")?;
    let window = web_sys::window().ok_or("No window object")?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
    window
        .open_with_url_and_target(&url, "_blank")
        .map_err(|e| format!("Failed to open print view: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Product", "product.name"),
            ColumnDef::new("Quantity", "quantity"),
        ]
    }

    #[test]
    fn test_shape_rows_follows_column_order() {
        let rows = vec![
            json!({ "product": { "name": "Drill" }, "quantity": 4 }),
            json!({ "quantity": 1 }),
        ];
        let records = shape_rows(&columns(), &rows);
        assert_eq!(records[0], vec!["Drill".to_string(), "4".to_string()]);
        // Missing field flattens to an empty cell, not an error.
        assert_eq!(records[1], vec!["".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_csv_escapes_separators_and_quotes() {
        let records = vec![vec!["a;b".to_string(), "say \"hi\"".to_string()]];
        let csv = build_csv(&["A", "B"], &records);
        assert!(csv.starts_with('\u{FEFF}'));
        assert!(csv.contains("\"a;b\";\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_print_html_escapes_markup() {
        let html = build_print_html("orders", &["Name"], &[vec!["<b>x</b>".to_string()]]);
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!html.contains("<b>x</b>"));
    }
}
