//! Summary report: decoded from `/reports/summary`, laid out into fixed-size
//! pages and offered to the user as a text download.

use crate::util::{format_currency, format_date, truncate};
use serde::{Deserialize, Serialize};

/// Table rows per page, including rows of every table on the page.
pub(crate) const ROWS_PER_PAGE: usize = 20;
const WIDTH: usize = 72;
const MAX_CELL: usize = 32;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReportStats {
    pub total_users: u64,
    pub total_courses: u64,
    pub total_orders: u64,
    pub total_enrollments: u64,
    pub total_revenue: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TopCourse {
    #[serde(alias = "name")]
    pub title: String,
    pub enrollments: u64,
    pub revenue: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RecentOrder {
    #[serde(alias = "_id")]
    pub id: String,
    pub customer: String,
    pub amount: f64,
    pub status: String,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ReportSummary {
    pub stats: ReportStats,
    pub top_courses: Vec<TopCourse>,
    pub recent_orders: Vec<RecentOrder>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(col.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

/// A table slice placed on one page.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TableChunk {
    pub table: usize,
    pub rows: std::ops::Range<usize>,
    pub continued: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ReportPage {
    pub number: usize,
    pub show_stats: bool,
    pub chunks: Vec<TableChunk>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ReportDocument {
    pub title: String,
    pub generated_on: String,
    pub stats: Vec<(String, String)>,
    pub tables: Vec<Table>,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn build(summary: &ReportSummary, title: &str, generated_on: &str, currency: &str) -> Self {
        let s = &summary.stats;
        let stats = vec![
            ("Total revenue".to_string(), format_currency(s.total_revenue, currency)),
            ("Orders".to_string(), s.total_orders.to_string()),
            ("Courses".to_string(), s.total_courses.to_string()),
            ("Enrollments".to_string(), s.total_enrollments.to_string()),
            ("Users".to_string(), s.total_users.to_string()),
        ];

        let tables = vec![
            Table {
                title: "Top courses".to_string(),
                columns: vec!["#".into(), "Course".into(), "Enrollments".into(), "Revenue".into()],
                rows: summary
                    .top_courses
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        vec![
                            (i + 1).to_string(),
                            truncate(&c.title, MAX_CELL),
                            c.enrollments.to_string(),
                            format_currency(c.revenue, currency),
                        ]
                    })
                    .collect(),
            },
            Table {
                title: "Recent orders".to_string(),
                columns: vec![
                    "Order".into(),
                    "Customer".into(),
                    "Amount".into(),
                    "Status".into(),
                    "Date".into(),
                ],
                rows: summary
                    .recent_orders
                    .iter()
                    .map(|o| {
                        vec![
                            truncate(&o.id, 12),
                            truncate(&o.customer, MAX_CELL),
                            format_currency(o.amount, currency),
                            o.status.clone(),
                            format_date(&o.created_at),
                        ]
                    })
                    .collect(),
            },
        ];

        let pages = paginate_tables(&tables, ROWS_PER_PAGE);
        Self {
            title: title.to_string(),
            generated_on: generated_on.to_string(),
            stats,
            tables,
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn render_text(&self) -> String {
        let total = self.pages.len();
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push('\u{c}');
                out.push('\n');
            }
            self.render_page(page, total, &mut out);
        }
        out
    }

    fn render_page(&self, page: &ReportPage, total: usize, out: &mut String) {
        let band = "=".repeat(WIDTH);
        out.push_str(&band);
        out.push('\n');
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&format!("Generated {}\n", self.generated_on));
        out.push_str(&band);
        out.push_str("\n\n");

        if page.show_stats {
            let label_width = self.stats.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
            for (label, value) in &self.stats {
                out.push_str(&format!("  {label:<label_width$}  {value}\n"));
            }
            out.push('\n');
        }

        for chunk in &page.chunks {
            let Some(table) = self.tables.get(chunk.table) else {
                continue;
            };
            let widths = table.widths();
            let title = if chunk.continued {
                format!("{} (continued)", table.title)
            } else {
                table.title.clone()
            };
            out.push_str(&title);
            out.push('\n');
            out.push_str(&row_line(&table.columns, &widths));
            out.push_str(&row_line(
                &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(),
                &widths,
            ));
            if table.rows.is_empty() {
                out.push_str("(no data)\n");
            }
            for row in &table.rows[chunk.rows.clone()] {
                out.push_str(&row_line(row, &widths));
            }
            out.push('\n');
        }

        let footer = format!("Page {} of {}", page.number, total);
        out.push_str(&format!("{footer:>width$}\n", width = WIDTH));
    }
}

fn row_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// Flow table rows onto pages of at most `per_page` rows. Stats sit on the
/// first page only. An empty table still takes one row slot for its
/// placeholder line.
fn paginate_tables(tables: &[Table], per_page: usize) -> Vec<ReportPage> {
    let per_page = per_page.max(1);
    let mut pages = vec![ReportPage {
        number: 1,
        show_stats: true,
        chunks: Vec::new(),
    }];
    let mut used = 0usize;

    for (t, table) in tables.iter().enumerate() {
        let mut start = 0usize;
        let needed = table.rows.len().max(1);
        let mut placed = 0usize;
        while placed < needed {
            if used == per_page {
                let number = pages.len() + 1;
                pages.push(ReportPage {
                    number,
                    show_stats: false,
                    chunks: Vec::new(),
                });
                used = 0;
            }
            let take = (per_page - used).min(needed - placed);
            let end = (start + take).min(table.rows.len());
            if let Some(page) = pages.last_mut() {
                page.chunks.push(TableChunk {
                    table: t,
                    rows: start..end,
                    continued: placed > 0,
                });
            }
            used += take;
            placed += take;
            start = end;
        }
    }
    pages
}

/// Offer `content` as a file download via a temporary object URL.
pub(crate) fn download_text(filename: &str, content: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(content));
    let opts = web_sys::BlobPropertyBag::new();
    opts.set_type("text/plain;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(orders: usize) -> ReportSummary {
        ReportSummary {
            stats: ReportStats {
                total_users: 12,
                total_courses: 3,
                total_orders: orders as u64,
                total_enrollments: 40,
                total_revenue: 1250.5,
            },
            top_courses: vec![TopCourse {
                title: "Intro to Rust".to_string(),
                enrollments: 30,
                revenue: 900.0,
            }],
            recent_orders: (0..orders)
                .map(|i| RecentOrder {
                    id: format!("o{i}"),
                    customer: "Ada".to_string(),
                    amount: 10.0,
                    status: "completed".to_string(),
                    created_at: "2024-03-09T08:00:00.000Z".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_summary_decodes_camel_case_with_defaults() {
        let s: ReportSummary = serde_json::from_value(serde_json::json!({
            "stats": {"totalRevenue": 700, "totalOrders": 2},
            "topCourses": [{"name": "Go", "enrollments": 5}],
        }))
        .expect("summary should parse");
        assert_eq!(s.stats.total_revenue, 700.0);
        assert_eq!(s.top_courses[0].title, "Go");
        assert!(s.recent_orders.is_empty());
    }

    #[test]
    fn test_single_page_report() {
        let doc = ReportDocument::build(&summary(2), "LearnHub summary", "2024-03-10", "$");
        assert_eq!(doc.page_count(), 1);

        let text = doc.render_text();
        assert!(text.contains("LearnHub summary"));
        assert!(text.contains("Generated 2024-03-10"));
        assert!(text.contains("$1,250.50"));
        assert!(text.contains("Intro to Rust"));
        assert!(text.contains("2024-03-09"));
        assert!(text.trim_end().ends_with("Page 1 of 1"));
    }

    #[test]
    fn test_rows_flow_onto_following_pages() {
        // 1 top course + 45 orders = 46 rows -> 20 + 20 + 6.
        let doc = ReportDocument::build(&summary(45), "r", "d", "$");
        assert_eq!(doc.page_count(), 3);
        assert!(doc.pages[0].show_stats);
        assert!(!doc.pages[1].show_stats);

        let rows_on = |p: &ReportPage| p.chunks.iter().map(|c| c.rows.len()).sum::<usize>();
        assert_eq!(rows_on(&doc.pages[0]), 20);
        assert_eq!(rows_on(&doc.pages[1]), 20);
        assert_eq!(rows_on(&doc.pages[2]), 6);
        assert!(doc.pages[1].chunks[0].continued);

        let text = doc.render_text();
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("Recent orders (continued)"));
    }

    #[test]
    fn test_empty_tables_render_placeholder() {
        let doc = ReportDocument::build(&ReportSummary::default(), "r", "d", "$");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.render_text().matches("(no data)").count(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = ReportDocument::build(&summary(30), "r", "2024-01-01", "$").render_text();
        let b = ReportDocument::build(&summary(30), "r", "2024-01-01", "$").render_text();
        assert_eq!(a, b);
    }
}
